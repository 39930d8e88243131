use std::sync::Arc;

use dioxus::prelude::*;
use medlearn_core::model::{OptionKey, SessionId};
use medlearn_core::stage::{QuizStep, StageMachine};
use services::{FlowError, LearningLoopService};

use crate::context::AppContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowIntent {
    SubmitTopic(String),
    Resume(SessionId),
    NextSlide,
    PreviousSlide,
    SelectSlide(usize),
    SelectOption(OptionKey),
    Advance,
    AcknowledgeError,
    RetryLevel,
    NextLevel,
    ReviewSlides,
    Restart,
}

/// Backend failures are already on the machine as a banner or dialog; stale
/// completions and rejected commands only reach the log.
fn log_flow_result<T>(result: Result<T, FlowError>) {
    match result {
        Ok(_) => {}
        Err(err) if err.is_stale() => tracing::debug!("dropped response from a discarded request"),
        Err(FlowError::Api(err)) => tracing::debug!(error = %err, "backend failure shown"),
        Err(err) => tracing::warn!(error = %err, "flow command rejected"),
    }
}

fn submit_topic(machine: Signal<StageMachine>, learning_loop: Arc<LearningLoopService>, query: &str) {
    let mut machine = machine;
    let request = match machine.write().begin_generation(query) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "topic rejected");
            return;
        }
    };
    spawn(async move {
        let result = learning_loop.fetch_lesson(&request).await;
        let mut machine = machine;
        log_flow_result(LearningLoopService::complete_generation(
            &mut machine.write(),
            request.ticket,
            result,
        ));
    });
}

fn resume(machine: Signal<StageMachine>, learning_loop: Arc<LearningLoopService>, session_id: SessionId) {
    let mut machine = machine;
    let ticket = match machine.write().begin_resume() {
        Ok(ticket) => ticket,
        Err(err) => {
            tracing::warn!(error = %err, "cannot resume session now");
            return;
        }
    };
    spawn(async move {
        let result = learning_loop.fetch_session(&session_id).await;
        let mut machine = machine;
        log_flow_result(LearningLoopService::complete_generation(
            &mut machine.write(),
            ticket,
            result,
        ));
    });
}

fn advance(machine: Signal<StageMachine>, learning_loop: Arc<LearningLoopService>) {
    let mut machine = machine;
    let step = machine.write().advance_question();
    let request = match step {
        Ok(QuizStep::NextQuestion) => return,
        Ok(QuizStep::Submit(request)) => request,
        Err(err) => {
            log_flow_result::<()>(Err(err.into()));
            return;
        }
    };
    spawn(async move {
        let result = learning_loop.evaluate(&request).await;
        let mut machine = machine;
        log_flow_result(LearningLoopService::complete_evaluation(
            &mut machine.write(),
            request.ticket,
            result,
        ));
    });
}

pub fn use_flow_dispatcher(machine: Signal<StageMachine>) -> Callback<FlowIntent> {
    let ctx = use_context::<AppContext>();
    let learning_loop = ctx.learning_loop();

    use_callback(move |intent: FlowIntent| {
        let mut machine = machine;
        let learning_loop = Arc::clone(&learning_loop);
        match intent {
            FlowIntent::SubmitTopic(query) => submit_topic(machine, learning_loop, &query),
            FlowIntent::Resume(session_id) => resume(machine, learning_loop, session_id),
            FlowIntent::NextSlide => {
                log_flow_result(machine.write().next_slide().map_err(FlowError::from));
            }
            FlowIntent::PreviousSlide => {
                log_flow_result(machine.write().previous_slide().map_err(FlowError::from));
            }
            FlowIntent::SelectSlide(index) => {
                log_flow_result(machine.write().select_slide(index).map_err(FlowError::from));
            }
            FlowIntent::SelectOption(option) => {
                log_flow_result(machine.write().select_option(option).map_err(FlowError::from));
            }
            FlowIntent::Advance => advance(machine, learning_loop),
            FlowIntent::AcknowledgeError => {
                machine.write().acknowledge_evaluation_error();
            }
            FlowIntent::RetryLevel => {
                log_flow_result(machine.write().retry_level().map_err(FlowError::from));
            }
            FlowIntent::NextLevel => {
                log_flow_result(machine.write().next_level().map_err(FlowError::from));
            }
            FlowIntent::ReviewSlides => {
                log_flow_result(machine.write().review_slides().map_err(FlowError::from));
            }
            FlowIntent::Restart => {
                machine.write().restart();
                tracing::info!("flow restarted");
            }
        }
    })
}
