use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{LearnView, StatusView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LearnView)] Learn {},
        #[route("/status", StatusView)] Status {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        header { class: "topbar",
            div { class: "topbar__brand",
                span { class: "topbar__logo", "🩺" }
                div {
                    h1 { "MedLearn AI" }
                    p { class: "topbar__tagline", "Adaptive Medical Learning" }
                }
            }
            nav { class: "topbar__nav",
                Link { to: Route::Learn {}, "Learn" }
                Link { to: Route::Status {}, "Backend status" }
            }
        }
    }
}
