use dioxus::prelude::*;
use medlearn_core::stage::{Stage, StageMachine};

use crate::context::AppContext;

use super::actions::{FlowIntent, use_flow_dispatcher};
use super::input::InputScreen;
use super::loading::LoadingScreen;
use super::mastery::MasteryScreen;
use super::presentation::PresentationScreen;
use super::quiz::QuizScreen;

#[component]
pub fn LearnView() -> Element {
    let ctx = use_context::<AppContext>();
    let machine = use_signal(StageMachine::new);
    let dispatch = use_flow_dispatcher(machine);

    use_effect(move || {
        if let Some(session_id) = ctx.take_resume_session() {
            tracing::info!(session_id = %session_id, "reopening session from launch options");
            dispatch.call(FlowIntent::Resume(session_id));
        }
    });

    rsx! { FlowScreen { machine, dispatch } }
}

#[component]
pub fn FlowScreen(machine: Signal<StageMachine>, dispatch: Callback<FlowIntent>) -> Element {
    let state = machine.read();
    let stage = state.stage();
    let topic = state.session().map(|s| s.topic().to_string());
    let error = state.error().map(str::to_string);
    drop(state);

    let show_restart = !matches!(stage, Stage::Input | Stage::Loading);

    rsx! {
        div { class: "page flow-page",
            if show_restart {
                div { class: "flow-bar",
                    if let Some(topic) = topic {
                        span { class: "flow-bar__topic", "{topic}" }
                    }
                    button {
                        class: "btn btn-secondary flow-bar__restart",
                        id: "flow-restart",
                        r#type: "button",
                        onclick: move |_| dispatch.call(FlowIntent::Restart),
                        "← New Topic"
                    }
                }
            }
            if let Some(message) = error {
                div { class: "flow-error", role: "alert",
                    span { class: "flow-error__icon", "⚠️" }
                    div {
                        p { class: "flow-error__title", "Error" }
                        p { class: "flow-error__message", "{message}" }
                    }
                }
            }
            match stage {
                Stage::Input => rsx! { InputScreen { dispatch } },
                Stage::Loading => rsx! { LoadingScreen {} },
                Stage::Learning => rsx! { PresentationScreen { machine, dispatch } },
                Stage::Quiz => rsx! { QuizScreen { machine, dispatch } },
                Stage::Complete => rsx! { MasteryScreen { machine, dispatch } },
            }
            footer { class: "flow-footer", "Built with 💙 for Medical Students" }
        }
    }
}
