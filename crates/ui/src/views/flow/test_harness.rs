use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use medlearn_core::model::SessionId;
use medlearn_core::stage::StageMachine;
use services::{InMemoryBackend, LearningLoopService};
use url::Url;

use crate::context::{AppContext, UiApp, build_app_context};

use super::actions::{FlowIntent, use_flow_dispatcher};
use super::view::FlowScreen;

struct TestApp {
    learning_loop: Arc<LearningLoopService>,
}

impl UiApp for TestApp {
    fn learning_loop(&self) -> Arc<LearningLoopService> {
        Arc::clone(&self.learning_loop)
    }

    fn media_base(&self) -> Option<Url> {
        Url::parse("http://backend.test/").ok()
    }

    fn resume_session(&self) -> Option<SessionId> {
        None
    }

    fn backend_label(&self) -> String {
        "in-memory".to_string()
    }
}

#[derive(Clone, Default)]
pub struct HarnessHandles {
    dispatch: Rc<RefCell<Option<Callback<FlowIntent>>>>,
    machine: Rc<RefCell<Option<Signal<StageMachine>>>>,
}

#[derive(Props, Clone)]
struct HarnessProps {
    context: AppContext,
    handles: HarnessHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn FlowHarnessRoot(props: HarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    rsx! { FlowHarnessBody { handles: props.handles.clone() } }
}

#[derive(Props, Clone)]
struct BodyProps {
    handles: HarnessHandles,
}

impl PartialEq for BodyProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn FlowHarnessBody(props: BodyProps) -> Element {
    let machine = use_signal(StageMachine::new);
    let dispatch = use_flow_dispatcher(machine);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *props.handles.dispatch.borrow_mut() = Some(dispatch);
        *props.handles.machine.borrow_mut() = Some(machine);
    }
    rsx! { FlowScreen { machine, dispatch } }
}

pub struct FlowHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryBackend,
    handles: HarnessHandles,
}

impl FlowHarness {
    pub fn dispatch(&mut self, intent: FlowIntent) {
        let dispatch = (*self.handles.dispatch.borrow()).expect("dispatch registered");
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn machine(&self) -> StageMachine {
        let machine = (*self.handles.machine.borrow()).expect("machine registered");
        self.dom.in_runtime(|| machine.peek().clone())
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

pub fn setup_flow_harness(backend: InMemoryBackend) -> FlowHarness {
    let learning_loop = Arc::new(LearningLoopService::new(Arc::new(backend.clone())));
    let app: Arc<dyn UiApp> = Arc::new(TestApp { learning_loop });
    let handles = HarnessHandles::default();
    let mut dom = VirtualDom::new_with_props(
        FlowHarnessRoot,
        HarnessProps {
            context: build_app_context(&app),
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    FlowHarness {
        dom,
        backend,
        handles,
    }
}
