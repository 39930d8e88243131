use dioxus::document::eval;
use dioxus::prelude::*;
use medlearn_core::stage::StageMachine;

use crate::context::AppContext;
use crate::vm::{ImageState, SlideMedia, map_slide};

use super::actions::FlowIntent;

const TOGGLE_AUDIO_JS: &str = r#"(function() {
    const audio = document.getElementById("slide-audio");
    if (!audio) return;
    if (audio.paused) { audio.play().catch(() => {}); } else { audio.pause(); }
})();"#;

#[component]
pub fn PresentationScreen(machine: Signal<StageMachine>, dispatch: Callback<FlowIntent>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut media = use_signal(SlideMedia::default);

    use_effect(move || {
        let _ = eval(r#"document.getElementById("slide-deck")?.focus();"#);
    });

    // Media events from the previous slide never arrive once it is unmounted.
    use_effect(move || {
        let index = machine.read().walker().map(|w| w.current());
        if let Some(index) = index {
            media.write().show(index);
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| match evt.data.key() {
        Key::ArrowRight => {
            evt.prevent_default();
            dispatch.call(FlowIntent::NextSlide);
        }
        Key::ArrowLeft => {
            evt.prevent_default();
            dispatch.call(FlowIntent::PreviousSlide);
        }
        _ => {}
    });

    let state = machine.read();
    let vm = match (state.session(), state.walker()) {
        (Some(session), Some(walker)) => map_slide(session, walker, ctx.media_base()),
        _ => None,
    };
    let topic = state.session().map(|s| s.topic().to_string()).unwrap_or_default();
    drop(state);

    let Some(vm) = vm else {
        return rsx! { p { "No slides available." } };
    };
    let index = vm.index;
    let image = media.read().image(index);
    let playing = media.read().is_playing(index);
    let image_class = if image == ImageState::Loaded {
        "slide__image slide__image--visible"
    } else {
        "slide__image"
    };

    rsx! {
        div { class: "deck", id: "slide-deck", tabindex: "0", onkeydown: on_key,
            div { class: "deck__header",
                h2 { class: "deck__topic", "{topic}" }
            }
            nav { class: "deck__dots", aria_label: "Slides",
                for (target, class, tooltip) in vm.dots.iter().map(|d| (d.index, d.class, d.tooltip.clone())) {
                    button {
                        key: "{target}",
                        class,
                        r#type: "button",
                        title: "{tooltip}",
                        onclick: move |_| dispatch.call(FlowIntent::SelectSlide(target)),
                    }
                }
            }
            div { class: "deck__progress",
                span { "{vm.progress_label}" }
                div { class: "progress",
                    div { class: "progress__bar", style: "width: {vm.progress_percent}%" }
                }
            }
            article { class: "slide",
                header { class: "slide__title",
                    h3 { "{vm.title}" }
                }
                div { class: "slide__media",
                    if image.show_placeholder() {
                        div { class: "slide__placeholder", "Loading image..." }
                    }
                    if image == ImageState::Failed {
                        div { class: "slide__placeholder slide__placeholder--failed",
                            span { "🖼️" }
                            p { "Image unavailable" }
                        }
                    } else {
                        img {
                            key: "{index}",
                            class: image_class,
                            src: "{vm.image_src}",
                            alt: "{vm.title}",
                            onload: move |_| media.write().image_loaded(index),
                            onerror: move |_| media.write().image_failed(index),
                        }
                    }
                }
                div { class: "slide__body",
                    h4 { class: "slide__points-title", "📌 Key Points" }
                    ul { class: "slide__points",
                        for (i, point) in vm.bullet_points.iter().enumerate() {
                            li { key: "{i}", "{point}" }
                        }
                    }
                    if let Some(audio_src) = vm.audio_src.clone() {
                        div { class: "narration",
                            button {
                                class: "narration__toggle",
                                id: "slide-audio-toggle",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = eval(TOGGLE_AUDIO_JS);
                                },
                                if playing { "⏸" } else { "▶" }
                            }
                            p { class: "narration__status",
                                if playing { "Now playing..." } else { "Click to listen" }
                            }
                            audio {
                                key: "{index}",
                                id: "slide-audio",
                                src: "{audio_src}",
                                autoplay: true,
                                onplay: move |_| media.write().set_playing(index, true),
                                onpause: move |_| media.write().set_playing(index, false),
                                onended: move |_| media.write().set_playing(index, false),
                            }
                        }
                    }
                    if !vm.narration.is_empty() {
                        details { class: "transcript",
                            summary { "📖 Read Full Transcript" }
                            p { "{vm.narration}" }
                        }
                    }
                }
                footer { class: "slide__nav",
                    button {
                        class: "btn btn-secondary",
                        id: "slide-previous",
                        r#type: "button",
                        disabled: !vm.can_go_back,
                        onclick: move |_| dispatch.call(FlowIntent::PreviousSlide),
                        "← Previous"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "slide-next",
                        r#type: "button",
                        onclick: move |_| dispatch.call(FlowIntent::NextSlide),
                        "{vm.next_label} →"
                    }
                }
            }
        }
    }
}
