use dioxus::prelude::*;

use crate::vm::{LOADING_TICK, map_loading};

#[component]
pub fn LoadingScreen() -> Element {
    let mut ticks = use_signal(|| 0_u64);
    use_future(move || async move {
        loop {
            tokio::time::sleep(LOADING_TICK).await;
            ticks += 1;
        }
    });

    let vm = map_loading(ticks());

    rsx! {
        div { class: "loading", role: "status", aria_live: "polite",
            div { class: "loading__icon", "{vm.active_icon}" }
            h2 { class: "loading__title", "{vm.title}" }
            p { class: "loading__hint", "This may take 30-60 seconds" }
            ul { class: "loading__steps",
                for step in vm.steps.iter() {
                    li { key: "{step.text}", class: step.status.class(),
                        span { class: "loading-step__icon", "{step.icon}" }
                        span { class: "loading-step__text", "{step.text}" }
                    }
                }
            }
            div { class: "progress",
                div { class: "progress__bar", style: "width: {vm.progress_percent}%" }
            }
            p { class: "loading__step-label", "{vm.step_label}" }
            p { class: "loading__tip", "💡 Tip: Complex topics may take slightly longer to generate" }
        }
    }
}
