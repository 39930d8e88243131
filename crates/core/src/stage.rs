//! Top-level learning flow: input → loading → learning → quiz → complete.
//!
//! The machine is synchronous. Network round trips are split into a `begin_*`
//! call that hands out a request stamped with a [`Ticket`] and a completion
//! call that must present the same ticket. Restarting bumps the epoch, so any
//! response to a request issued before the restart is rejected as stale.

use crate::error::{ProgressionError, StageError};
use crate::model::{AnswerSet, Level, LevelResult, OptionKey, Session, SessionId, Slide};
use crate::progression::{Advance, LevelOutcome, QuizProgression, QuizSignal};
use crate::walker::{PresentationWalker, WalkStep};

pub const GENERATION_FAILED: &str = "Failed to generate content. Please try again.";
pub const EVALUATION_FAILED: &str = "Failed to evaluate quiz. Please try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Input,
    Loading,
    Learning,
    Quiz,
    Complete,
}

/// Identifies the flow epoch a request was issued in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub ticket: Ticket,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub ticket: Ticket,
    pub session_id: SessionId,
    pub level: Level,
    pub answers: AnswerSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizStep {
    NextQuestion,
    Submit(EvaluationRequest),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageMachine {
    stage: Stage,
    epoch: u64,
    session: Option<Session>,
    walker: Option<PresentationWalker>,
    quiz: Option<QuizProgression>,
    error: Option<String>,
}

impl StageMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn walker(&self) -> Option<&PresentationWalker> {
        self.walker.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizProgression> {
        self.quiz.as_ref()
    }

    /// Banner error from the last failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn ticket(&self) -> Ticket {
        Ticket(self.epoch)
    }

    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        let walker = self.walker.as_ref()?;
        self.session.as_ref()?.slide(walker.current())
    }

    fn require_stage(&self, expected: Stage) -> Result<(), StageError> {
        if self.stage != expected {
            return Err(StageError::WrongStage {
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    fn check_ticket(&self, ticket: Ticket) -> Result<(), StageError> {
        if ticket != self.ticket() {
            return Err(StageError::Stale);
        }
        Ok(())
    }

    fn enter_loading(&mut self) -> Ticket {
        self.epoch += 1;
        self.error = None;
        self.stage = Stage::Loading;
        self.ticket()
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Submit a topic. Clears any previous error.
    ///
    /// # Errors
    ///
    /// Returns `StageError::EmptyQuery` for a blank topic (the stage is unchanged),
    /// or `StageError::WrongStage` outside `Input`.
    pub fn begin_generation(&mut self, query: &str) -> Result<GenerationRequest, StageError> {
        self.require_stage(Stage::Input)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(StageError::EmptyQuery);
        }
        let ticket = self.enter_loading();
        Ok(GenerationRequest {
            ticket,
            query: query.to_string(),
        })
    }

    /// Reopen an existing backend session instead of generating a new one.
    /// Completes through [`Self::generation_succeeded`] / [`Self::generation_failed`].
    ///
    /// # Errors
    ///
    /// Returns `StageError::WrongStage` outside `Input`.
    pub fn begin_resume(&mut self) -> Result<Ticket, StageError> {
        self.require_stage(Stage::Input)?;
        Ok(self.enter_loading())
    }

    /// # Errors
    ///
    /// Returns `StageError::Stale` for a discarded request, or `StageError::WrongStage`.
    pub fn generation_succeeded(
        &mut self,
        ticket: Ticket,
        session: Session,
    ) -> Result<(), StageError> {
        self.check_ticket(ticket)?;
        self.require_stage(Stage::Loading)?;
        let walker = PresentationWalker::new(session.slides().len())?;
        self.session = Some(session);
        self.walker = Some(walker);
        self.quiz = None;
        self.stage = Stage::Learning;
        Ok(())
    }

    /// Return to input with the error shown. No session is kept.
    ///
    /// # Errors
    ///
    /// Returns `StageError::Stale` for a discarded request, or `StageError::WrongStage`.
    pub fn generation_failed(
        &mut self,
        ticket: Ticket,
        message: impl Into<String>,
    ) -> Result<(), StageError> {
        self.check_ticket(ticket)?;
        self.require_stage(Stage::Loading)?;
        let message = message.into();
        self.error = Some(if message.trim().is_empty() {
            GENERATION_FAILED.to_string()
        } else {
            message
        });
        self.session = None;
        self.walker = None;
        self.quiz = None;
        self.stage = Stage::Input;
        Ok(())
    }

    //
    // ─── LEARNING ──────────────────────────────────────────────────────────────
    //

    fn walker_mut(&mut self) -> Result<&mut PresentationWalker, StageError> {
        self.require_stage(Stage::Learning)?;
        self.walker.as_mut().ok_or(StageError::NoSession)
    }

    /// Advance the deck. On the last slide the quiz starts instead.
    ///
    /// # Errors
    ///
    /// Returns `StageError::WrongStage` outside `Learning`.
    pub fn next_slide(&mut self) -> Result<WalkStep, StageError> {
        let step = self.walker_mut()?.next();
        if step == WalkStep::Completed {
            self.enter_quiz()?;
        }
        Ok(step)
    }

    /// # Errors
    ///
    /// Returns `StageError::WrongStage` outside `Learning`.
    pub fn previous_slide(&mut self) -> Result<bool, StageError> {
        Ok(self.walker_mut()?.previous())
    }

    /// # Errors
    ///
    /// Returns `StageError::Walker` for an out-of-range index.
    pub fn select_slide(&mut self, index: usize) -> Result<(), StageError> {
        self.walker_mut()?.select(index)?;
        Ok(())
    }

    fn enter_quiz(&mut self) -> Result<(), StageError> {
        if self.quiz.is_none() {
            let session = self.session.as_ref().ok_or(StageError::NoSession)?;
            self.quiz = Some(QuizProgression::new(session.quiz().clone()));
        }
        self.stage = Stage::Quiz;
        Ok(())
    }

    //
    // ─── QUIZ ──────────────────────────────────────────────────────────────────
    //

    fn quiz_mut(&mut self) -> Result<&mut QuizProgression, StageError> {
        self.require_stage(Stage::Quiz)?;
        self.quiz.as_mut().ok_or(StageError::NoSession)
    }

    /// # Errors
    ///
    /// Propagates `ProgressionError` from the quiz engine.
    pub fn select_option(&mut self, option: OptionKey) -> Result<(), StageError> {
        self.quiz_mut()?.select(option)?;
        Ok(())
    }

    /// Record the selected answer. On the last question of a level this yields
    /// the request to grade it.
    ///
    /// # Errors
    ///
    /// Propagates `ProgressionError` from the quiz engine.
    pub fn advance_question(&mut self) -> Result<QuizStep, StageError> {
        let ticket = self.ticket();
        let session_id = self
            .session
            .as_ref()
            .map(|session| session.session_id().clone())
            .ok_or(StageError::NoSession)?;
        match self.quiz_mut()?.advance()? {
            Advance::NextQuestion => Ok(QuizStep::NextQuestion),
            Advance::Submit(submission) => Ok(QuizStep::Submit(EvaluationRequest {
                ticket,
                session_id,
                level: submission.level,
                answers: submission.answers,
            })),
        }
    }

    /// Apply a grade. Mastery moves the flow to `Complete`.
    ///
    /// A result for the wrong level is handled like a failed call.
    ///
    /// # Errors
    ///
    /// Returns `StageError::Stale` for a discarded request, or the engine's error.
    pub fn evaluation_succeeded(
        &mut self,
        ticket: Ticket,
        result: LevelResult,
    ) -> Result<LevelOutcome, StageError> {
        self.check_ticket(ticket)?;
        let quiz = self.quiz_mut()?;
        match quiz.apply_result(result) {
            Ok(outcome) => {
                if let Some(signal) = outcome.signal() {
                    self.apply_signal(signal)?;
                }
                Ok(outcome)
            }
            Err(err @ ProgressionError::LevelMismatch { .. }) => {
                quiz.submission_failed(err.to_string())?;
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Surface a grading failure. The quiz stays on the last question.
    ///
    /// # Errors
    ///
    /// Returns `StageError::Stale` for a discarded request, or the engine's error.
    pub fn evaluation_failed(
        &mut self,
        ticket: Ticket,
        message: impl Into<String>,
    ) -> Result<(), StageError> {
        self.check_ticket(ticket)?;
        let message = message.into();
        let message = if message.trim().is_empty() {
            EVALUATION_FAILED.to_string()
        } else {
            message
        };
        self.quiz_mut()?.submission_failed(message)?;
        Ok(())
    }

    /// Dismiss the grading failure dialog. Returns false if none was shown.
    pub fn acknowledge_evaluation_error(&mut self) -> bool {
        self.quiz_mut()
            .map(QuizProgression::acknowledge_failure)
            .unwrap_or(false)
    }

    /// # Errors
    ///
    /// Only valid while a failed level result is shown.
    pub fn retry_level(&mut self) -> Result<(), StageError> {
        self.quiz_mut()?.retry()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Only valid while a passed, non-final level result is shown.
    pub fn next_level(&mut self) -> Result<Level, StageError> {
        Ok(self.quiz_mut()?.next_level()?)
    }

    /// Leave a failed level for the slides, starting again from the first slide.
    /// Quiz progress is discarded; the next quiz entry begins at Beginner.
    ///
    /// # Errors
    ///
    /// Only valid while a failed level result is shown.
    pub fn review_slides(&mut self) -> Result<(), StageError> {
        let signal = self.quiz_mut()?.review()?;
        self.apply_signal(signal)
    }

    fn apply_signal(&mut self, signal: QuizSignal) -> Result<(), StageError> {
        match signal {
            QuizSignal::MasteryAchieved => {
                self.stage = Stage::Complete;
            }
            QuizSignal::ReviewNeeded => {
                self.walker.as_mut().ok_or(StageError::NoSession)?.reset();
                // The quiz starts over from Beginner when it is entered again.
                self.quiz = None;
                self.stage = Stage::Learning;
            }
        }
        Ok(())
    }

    /// Discard the session and any in-flight request; back to input.
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.session = None;
        self.walker = None;
        self.quiz = None;
        self.error = None;
        self.stage = Stage::Input;
    }
}
