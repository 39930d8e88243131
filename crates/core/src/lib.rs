#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod progression;
pub mod stage;
pub mod walker;

pub use error::{LevelError, ProgressionError, QuizSpecError, SessionError, StageError, WalkerError};
