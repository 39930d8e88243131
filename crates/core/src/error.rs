use thiserror::Error;

use crate::model::Level;
use crate::stage::Stage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("quiz level must be between 1 and 4, got {0}")]
    OutOfRange(u8),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizSpecError {
    #[error("unknown quiz level key {0:?}")]
    UnknownLevel(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has no slides")]
    NoSlides,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkerError {
    #[error("presentation has no slides")]
    Empty,
    #[error("slide {index} is out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },
}

/// Rejected quiz progression commands. None of these mutate the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("questions for this level are not available yet")]
    Pending,
    #[error("a submission is already in flight")]
    Submitting,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error("the level result is being shown")]
    ShowingResult,
    #[error("no level result is being shown")]
    NoResult,
    #[error("the evaluation failure has not been acknowledged")]
    FailureUnacknowledged,
    #[error("select an option first")]
    NoSelection,
    #[error("option {0} is not offered for this question")]
    UnknownOption(String),
    #[error("answers cover {answered} of {expected} questions")]
    IncompleteAnswers { answered: usize, expected: usize },
    #[error("graded {got} but {expected} was submitted")]
    LevelMismatch { expected: Level, got: Level },
    #[error("only a failed level can be retried or reviewed")]
    NotFailed,
    #[error("only a passed level can advance")]
    NotPassed,
    #[error("there is no level after {0}")]
    FinalLevel(Level),
}

/// Rejected stage transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StageError {
    #[error("enter a topic to learn about")]
    EmptyQuery,
    #[error("expected the {expected:?} stage, currently {actual:?}")]
    WrongStage { expected: Stage, actual: Stage },
    #[error("response belongs to a discarded request")]
    Stale,
    #[error("no session is loaded")]
    NoSession,
    #[error(transparent)]
    Walker(#[from] WalkerError),
    #[error(transparent)]
    Progression(#[from] ProgressionError),
}
