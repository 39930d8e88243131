use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn StatusView() -> Element {
    let ctx = use_context::<AppContext>();
    let learning_loop = ctx.learning_loop();
    let backend = ctx.backend_label().to_string();
    let resume = ctx.configured_resume_session().map(ToString::to_string);

    let mut resource = use_resource(move || {
        let learning_loop = learning_loop.clone();
        async move {
            let payload = learning_loop.ping().await.map_err(|err| {
                tracing::warn!(error = %err, "liveness probe failed");
                ViewError::Unavailable
            })?;
            let pretty = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
            Ok::<_, ViewError>(pretty)
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page status-page",
            h2 { "Backend status" }
            p { class: "status-page__backend", "Backend: {backend}" }
            if let Some(session) = resume {
                p { class: "status-page__resume", "Resumed session: {session}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Checking..." }
                },
                ViewState::Ready(payload) => rsx! {
                    p { class: "status-page__ok", "✅ Backend is running" }
                    pre { class: "status-page__payload", "{payload}" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "status-page__error", "{err.message()}" }
                },
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| resource.restart(),
                "Check again"
            }
        }
    }
}
