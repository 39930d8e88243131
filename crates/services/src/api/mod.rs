//! Backend gateway: one capability trait and its two adapters.

mod http;
mod memory;
mod wire;

use async_trait::async_trait;
use medlearn_core::model::{AnswerSet, Level, LevelResult, Session, SessionId};

use crate::error::ApiError;

pub use http::{ApiConfig, HttpBackend, DEFAULT_API_URL};
pub use memory::{grade, AnswerKey, Call, InMemoryBackend, KeyedAnswer};

/// The three lesson operations plus a liveness probe.
///
/// Each call is a single best-effort round trip. No retries, no caching.
#[async_trait]
pub trait BackendPort: Send + Sync {
    /// Generate slides and a four-level quiz for a topic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Generation` on any failure.
    async fn generate_learning(&self, query: &str) -> Result<Session, ApiError>;

    /// Grade one level's answers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Evaluation` on any failure.
    async fn evaluate_quiz(
        &self,
        session_id: &SessionId,
        level: Level,
        answers: &AnswerSet,
    ) -> Result<LevelResult, ApiError>;

    /// Fetch a previously generated session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the backend does not know the session.
    async fn get_session(&self, session_id: &SessionId) -> Result<Session, ApiError>;

    /// Liveness payload. Opaque to the client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` when the backend cannot be reached.
    async fn ping(&self) -> Result<serde_json::Value, ApiError>;
}
