use serde::{Deserialize, Serialize};

use medlearn_core::model::{AnswerSet, Level, QuizSpec, Session, SessionId, Slide};
use medlearn_core::SessionError;

#[derive(Debug, Serialize)]
pub(crate) struct LearnRequest<'a> {
    pub query: &'a str,
}

/// Body of `POST /api/learn` and `GET /api/session/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct LessonResponse {
    session_id: SessionId,
    content: LessonContent,
    #[serde(default)]
    quiz_data: QuizSpec,
}

#[derive(Debug, Deserialize)]
struct LessonContent {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    slides: Vec<Slide>,
}

impl LessonResponse {
    /// The topic falls back to the query when the backend omits it.
    pub fn into_session(self, fallback_topic: &str) -> Result<Session, SessionError> {
        let topic = if self.content.topic.trim().is_empty() {
            fallback_topic.to_string()
        } else {
            self.content.topic
        };
        Session::new(self.session_id, topic, self.content.slides, self.quiz_data)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateRequest<'a> {
    pub session_id: &'a SessionId,
    pub level: Level,
    pub user_answers: &'a AnswerSet,
}

/// Non-2xx body. FastAPI validation errors put a list in `detail`, which is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

impl ErrorBody {
    pub fn detail(self) -> Option<String> {
        match self.detail {
            serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}
