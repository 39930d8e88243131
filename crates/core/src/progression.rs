//! Four-level progressive quiz.
//!
//! Walks one level's questions in order, collects one answer per question and
//! hands the full answer set out for grading on the last question. Grading
//! itself happens elsewhere; the caller feeds the result back through
//! [`QuizProgression::apply_result`] or [`QuizProgression::submission_failed`].

use std::collections::BTreeSet;

use crate::error::ProgressionError;
use crate::model::{AnswerSet, Level, LevelResult, LevelSpec, OptionKey, Question, QuizSpec};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    Submitting,
    Reviewing(LevelResult),
}

/// What the question view should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionState<'a> {
    /// The level has no questions yet. Never treated as a zero-question pass.
    Pending,
    Ready {
        question: &'a Question,
        /// One-based position within the level.
        number: usize,
        of: usize,
    },
}

/// Answers for one level, ready to be graded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSubmission {
    pub level: Level,
    pub answers: AnswerSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    Submit(LevelSubmission),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    Failed,
    Passed { next: Level },
    Mastered,
}

/// Signals raised to the stage machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizSignal {
    MasteryAchieved,
    ReviewNeeded,
}

impl LevelOutcome {
    #[must_use]
    pub fn signal(self) -> Option<QuizSignal> {
        match self {
            LevelOutcome::Mastered => Some(QuizSignal::MasteryAchieved),
            LevelOutcome::Failed | LevelOutcome::Passed { .. } => None,
        }
    }

    fn of(level: Level, result: &LevelResult) -> Self {
        if !result.passed {
            return LevelOutcome::Failed;
        }
        match level.next() {
            // A mastery flag below Expert is ignored.
            Some(next) => LevelOutcome::Passed { next },
            None => LevelOutcome::Mastered,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizProgression {
    quiz: QuizSpec,
    level: Level,
    question_index: usize,
    selected: Option<OptionKey>,
    answers: AnswerSet,
    phase: QuizPhase,
    completed: BTreeSet<Level>,
    failure: Option<String>,
}

impl QuizProgression {
    #[must_use]
    pub fn new(quiz: QuizSpec) -> Self {
        Self {
            quiz,
            level: Level::Beginner,
            question_index: 0,
            selected: None,
            answers: AnswerSet::new(),
            phase: QuizPhase::Answering,
            completed: BTreeSet::new(),
            failure: None,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn level_spec(&self) -> &LevelSpec {
        self.quiz.level(self.level)
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn selected(&self) -> Option<&OptionKey> {
        self.selected.as_ref()
    }

    /// Answers committed so far in this attempt.
    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, QuizPhase::Submitting)
    }

    #[must_use]
    pub fn result(&self) -> Option<&LevelResult> {
        match &self.phase {
            QuizPhase::Reviewing(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.result().map(|result| LevelOutcome::of(self.level, result))
    }

    #[must_use]
    pub fn is_completed(&self, level: Level) -> bool {
        self.completed.contains(&level)
    }

    /// Passed levels in ascending order.
    pub fn completed_levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.completed.iter().copied()
    }

    /// Evaluation failure awaiting acknowledgement.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    #[must_use]
    pub fn current(&self) -> QuestionState<'_> {
        let questions = self.level_spec().questions();
        match questions.get(self.question_index) {
            Some(question) => QuestionState::Ready {
                question,
                number: self.question_index + 1,
                of: questions.len(),
            },
            None => QuestionState::Pending,
        }
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 == self.level_spec().questions().len()
    }

    fn ensure_answering(&self) -> Result<(), ProgressionError> {
        match self.phase {
            QuizPhase::Submitting => return Err(ProgressionError::Submitting),
            QuizPhase::Reviewing(_) => return Err(ProgressionError::ShowingResult),
            QuizPhase::Answering => {}
        }
        if self.failure.is_some() {
            return Err(ProgressionError::FailureUnacknowledged);
        }
        Ok(())
    }

    /// Choose an option for the current question.
    ///
    /// # Errors
    ///
    /// Rejected while submitting, while a result or failure is shown, when the
    /// level is pending, or for a key the question does not offer.
    pub fn select(&mut self, option: OptionKey) -> Result<(), ProgressionError> {
        self.ensure_answering()?;
        let QuestionState::Ready { question, .. } = self.current() else {
            return Err(ProgressionError::Pending);
        };
        if !question.has_option(&option) {
            return Err(ProgressionError::UnknownOption(option.to_string()));
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Record the selection and move on. On the last question the level is
    /// handed out for grading and the engine waits in `Submitting`.
    ///
    /// The last answer is not committed until grading succeeds, so a failed
    /// submission leaves the engine on the same question with the same selection.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::NoSelection` if nothing is selected, plus the
    /// same phase errors as [`Self::select`].
    pub fn advance(&mut self) -> Result<Advance, ProgressionError> {
        self.ensure_answering()?;
        let QuestionState::Ready { question, .. } = self.current() else {
            return Err(ProgressionError::Pending);
        };
        let question_id = question.id;
        let option = self.selected.clone().ok_or(ProgressionError::NoSelection)?;

        if !self.is_last_question() {
            self.answers.record(question_id, option);
            self.question_index += 1;
            self.selected = None;
            return Ok(Advance::NextQuestion);
        }

        let mut answers = self.answers.clone();
        answers.record(question_id, option);
        let questions = self.level_spec().questions();
        if !answers.covers(questions) {
            return Err(ProgressionError::IncompleteAnswers {
                answered: answers.len(),
                expected: questions.len(),
            });
        }

        self.phase = QuizPhase::Submitting;
        Ok(Advance::Submit(LevelSubmission {
            level: self.level,
            answers,
        }))
    }

    /// Accept the grade for the in-flight submission.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::NotSubmitting` without a submission in flight and
    /// `ProgressionError::LevelMismatch` if the result is for another level. Both
    /// leave the engine untouched.
    pub fn apply_result(&mut self, result: LevelResult) -> Result<LevelOutcome, ProgressionError> {
        if !self.is_submitting() {
            return Err(ProgressionError::NotSubmitting);
        }
        if result.level != self.level {
            return Err(ProgressionError::LevelMismatch {
                expected: self.level,
                got: result.level,
            });
        }

        let last_question = match self.current() {
            QuestionState::Ready { question, .. } => Some(question.id),
            QuestionState::Pending => None,
        };
        if let (Some(question_id), Some(option)) = (last_question, self.selected.take()) {
            self.answers.record(question_id, option);
        }
        let outcome = LevelOutcome::of(self.level, &result);
        if result.passed {
            self.completed.insert(self.level);
        }
        self.phase = QuizPhase::Reviewing(result);
        Ok(outcome)
    }

    /// Grading failed: return to the last question, awaiting acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::NotSubmitting` without a submission in flight.
    pub fn submission_failed(&mut self, message: impl Into<String>) -> Result<(), ProgressionError> {
        if !self.is_submitting() {
            return Err(ProgressionError::NotSubmitting);
        }
        self.phase = QuizPhase::Answering;
        self.failure = Some(message.into());
        Ok(())
    }

    /// Dismiss the evaluation failure. Returns false if there was none.
    pub fn acknowledge_failure(&mut self) -> bool {
        self.failure.take().is_some()
    }

    /// Start the failed level over with the same questions.
    ///
    /// # Errors
    ///
    /// Only valid while a failed result is shown.
    pub fn retry(&mut self) -> Result<(), ProgressionError> {
        self.ensure_failed()?;
        self.reset_attempt();
        Ok(())
    }

    /// Move on after a pass.
    ///
    /// # Errors
    ///
    /// Only valid while a passed, non-final result is shown.
    pub fn next_level(&mut self) -> Result<Level, ProgressionError> {
        let result = self.result().ok_or(ProgressionError::NoResult)?;
        if !result.passed {
            return Err(ProgressionError::NotPassed);
        }
        let next = self
            .level
            .next()
            .ok_or(ProgressionError::FinalLevel(self.level))?;
        self.level = next;
        self.reset_attempt();
        Ok(next)
    }

    /// Leave a failed level to revisit the slides.
    ///
    /// # Errors
    ///
    /// Only valid while a failed result is shown.
    pub fn review(&mut self) -> Result<QuizSignal, ProgressionError> {
        self.ensure_failed()?;
        self.reset_attempt();
        Ok(QuizSignal::ReviewNeeded)
    }

    fn ensure_failed(&self) -> Result<(), ProgressionError> {
        match self.result() {
            None => Err(ProgressionError::NoResult),
            Some(result) if result.passed => Err(ProgressionError::NotFailed),
            Some(_) => Ok(()),
        }
    }

    fn reset_attempt(&mut self) {
        self.question_index = 0;
        self.selected = None;
        self.answers.clear();
        self.phase = QuizPhase::Answering;
        self.failure = None;
    }
}
