use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use medlearn_core::model::SessionId;
use services::{InMemoryBackend, LearningLoopService};
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::views::{LearnView, StatusView};

#[derive(Clone)]
struct TestApp {
    learning_loop: Arc<LearningLoopService>,
    resume: Option<SessionId>,
}

impl UiApp for TestApp {
    fn learning_loop(&self) -> Arc<LearningLoopService> {
        Arc::clone(&self.learning_loop)
    }

    fn media_base(&self) -> Option<Url> {
        Url::parse("http://backend.test/").ok()
    }

    fn resume_session(&self) -> Option<SessionId> {
        self.resume.clone()
    }

    fn backend_label(&self) -> String {
        "in-memory".to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Learn,
    Status,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Learn => rsx! { LearnView {} },
        ViewKind::Status => rsx! { StatusView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryBackend,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: InMemoryBackend) -> ViewHarness {
    setup_view_harness_with_resume(view, backend, None)
}

pub fn setup_view_harness_with_resume(
    view: ViewKind,
    backend: InMemoryBackend,
    resume: Option<SessionId>,
) -> ViewHarness {
    let learning_loop = Arc::new(LearningLoopService::new(Arc::new(backend.clone())));
    let app = Arc::new(TestApp {
        learning_loop,
        resume,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, backend }
}
