use std::sync::Arc;

use medlearn_core::model::{LevelResult, Session, SessionId};
use medlearn_core::progression::LevelOutcome;
use medlearn_core::stage::{EvaluationRequest, GenerationRequest, QuizStep, StageMachine, Ticket};

use crate::api::BackendPort;
use crate::error::{ApiError, FlowError};

/// Drives a `StageMachine` against a backend.
///
/// The `&mut StageMachine` methods run a whole round trip. The UI cannot hold
/// its state borrowed across an await, so each round trip is also available
/// as begin (on the machine) / call (here) / `complete_*` (here) steps.
#[derive(Clone)]
pub struct LearningLoopService {
    backend: Arc<dyn BackendPort>,
}

impl LearningLoopService {
    #[must_use]
    pub fn new(backend: Arc<dyn BackendPort>) -> Self {
        Self { backend }
    }

    /// Submit a topic and load the generated lesson.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Stage` for a rejected query and `FlowError::Api` when
    /// generation fails; the failure is also left on the machine as its banner.
    pub async fn generate(&self, machine: &mut StageMachine, query: &str) -> Result<(), FlowError> {
        let request = machine.begin_generation(query)?;
        let result = self.fetch_lesson(&request).await;
        Self::complete_generation(machine, request.ticket, result)
    }

    /// Reopen a session the backend already holds.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Api` with `ApiError::NotFound` for an unknown session.
    pub async fn resume(
        &self,
        machine: &mut StageMachine,
        session_id: &SessionId,
    ) -> Result<(), FlowError> {
        let ticket = machine.begin_resume()?;
        let result = self.fetch_session(session_id).await;
        Self::complete_generation(machine, ticket, result)
    }

    /// Record the selected answer. On the last question of a level the answers
    /// are graded and the outcome returned.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Stage` for a rejected command and `FlowError::Api`
    /// when grading fails; the machine then shows a blocking failure.
    pub async fn advance(
        &self,
        machine: &mut StageMachine,
    ) -> Result<Option<LevelOutcome>, FlowError> {
        match machine.advance_question()? {
            QuizStep::NextQuestion => Ok(None),
            QuizStep::Submit(request) => {
                let result = self.evaluate(&request).await;
                Self::complete_evaluation(machine, request.ticket, result).map(Some)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError::Generation` on any backend failure.
    pub async fn fetch_lesson(&self, request: &GenerationRequest) -> Result<Session, ApiError> {
        tracing::debug!(query = %request.query, "requesting lesson");
        self.backend.generate_learning(&request.query).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the backend does not know the session.
    pub async fn fetch_session(&self, session_id: &SessionId) -> Result<Session, ApiError> {
        tracing::debug!(session_id = %session_id, "resuming session");
        self.backend.get_session(session_id).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Evaluation` on any backend failure.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<LevelResult, ApiError> {
        tracing::debug!(
            session_id = %request.session_id,
            level = request.level.number(),
            answers = request.answers.len(),
            "submitting level"
        );
        self.backend
            .evaluate_quiz(&request.session_id, request.level, &request.answers)
            .await
    }

    /// Apply a lesson load result to the machine.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Stage(StageError::Stale)` if the machine moved on
    /// since the request was issued, or the backend failure itself.
    pub fn complete_generation(
        machine: &mut StageMachine,
        ticket: Ticket,
        result: Result<Session, ApiError>,
    ) -> Result<(), FlowError> {
        match result {
            Ok(session) => {
                tracing::info!(session_id = %session.session_id(), topic = session.topic(), "lesson ready");
                machine.generation_succeeded(ticket, session)?;
                Ok(())
            }
            Err(err) => {
                machine.generation_failed(ticket, err.message())?;
                tracing::warn!(error = %err, "lesson unavailable");
                Err(err.into())
            }
        }
    }

    /// Apply a grading result to the machine.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Stage(StageError::Stale)` if the machine moved on,
    /// a stage error for a result that does not match the submission, or the
    /// backend failure itself.
    pub fn complete_evaluation(
        machine: &mut StageMachine,
        ticket: Ticket,
        result: Result<LevelResult, ApiError>,
    ) -> Result<LevelOutcome, FlowError> {
        match result {
            Ok(result) => {
                let level = result.level;
                let outcome = machine.evaluation_succeeded(ticket, result)?;
                tracing::info!(level = level.number(), outcome = ?outcome, "level result applied");
                Ok(outcome)
            }
            Err(err) => {
                machine.evaluation_failed(ticket, err.message())?;
                tracing::warn!(error = %err, "grading failed");
                Err(err.into())
            }
        }
    }

    /// Liveness probe.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` when the backend cannot be reached.
    pub async fn ping(&self) -> Result<serde_json::Value, ApiError> {
        self.backend.ping().await
    }
}
