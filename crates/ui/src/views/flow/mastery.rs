use dioxus::prelude::*;
use medlearn_core::model::Level;
use medlearn_core::stage::StageMachine;

use crate::vm::level_class;

use super::actions::FlowIntent;

#[component]
pub fn MasteryScreen(machine: Signal<StageMachine>, dispatch: Callback<FlowIntent>) -> Element {
    let topic = machine
        .read()
        .session()
        .map(|s| s.topic().to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "mastery",
            div { class: "mastery__trophy", "🏆" }
            h1 { "Mastery Achieved!" }
            p { class: "mastery__subtitle",
                "Congratulations! You've mastered"
                br {}
                span { class: "mastery__topic", "{topic}" }
            }
            div { class: "mastery__levels",
                for (number, name, scheme) in Level::ALL.map(|l| (l.number(), l.name(), level_class(l))) {
                    div { key: "{number}", class: "mastery__level {scheme}",
                        div { "✅" }
                        div { class: "mastery__level-name", "{name}" }
                    }
                }
            }
            div { class: "mastery__stats",
                h3 { "Your Achievement" }
                div { class: "mastery__stat-grid",
                    div {
                        div { class: "mastery__stat", "4/4" }
                        div { class: "mastery__stat-label", "Levels Cleared" }
                    }
                    div {
                        div { class: "mastery__stat", "100%" }
                        div { class: "mastery__stat-label", "Complete" }
                    }
                    div {
                        div { class: "mastery__stat", "⭐" }
                        div { class: "mastery__stat-label", "Expert Status" }
                    }
                }
            }
            button {
                class: "btn btn-primary mastery__restart",
                id: "mastery-restart",
                r#type: "button",
                onclick: move |_| dispatch.call(FlowIntent::Restart),
                "Learn Another Topic →"
            }
            p { class: "mastery__motto", "🩺 Keep learning to become a medical expert!" }
        }
    }
}
