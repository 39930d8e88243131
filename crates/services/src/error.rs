//! Shared error types for the services crate.

use thiserror::Error;

use medlearn_core::StageError;

pub const GENERATION_FAILED: &str = "Failed to generate learning content";
pub const EVALUATION_FAILED: &str = "Failed to evaluate quiz";
pub const SESSION_NOT_FOUND: &str = "Session not found";
pub const BACKEND_UNAVAILABLE: &str = "Backend is unavailable";

/// Failures reported by a `BackendPort`. Every variant carries the message
/// shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Evaluation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ApiError::Generation(message)
            | ApiError::Evaluation(message)
            | ApiError::NotFound(message)
            | ApiError::Unavailable(message) => message,
        }
    }
}

/// Errors emitted while reading backend configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid backend URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Errors emitted by `LearningLoopService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Stage(#[from] StageError),
}

impl FlowError {
    /// The completion arrived for a request the user already walked away from.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, FlowError::Stage(StageError::Stale))
    }
}
