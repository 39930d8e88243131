use crate::error::SessionError;
use crate::model::{QuizSpec, SessionId, Slide};

/// One generated lesson: slides plus the four-level quiz, tied to a backend session.
///
/// Immutable for the lifetime of a learning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: SessionId,
    topic: String,
    slides: Vec<Slide>,
    quiz: QuizSpec,
}

impl Session {
    /// # Errors
    ///
    /// Returns `SessionError::NoSlides` when the lesson has nothing to present.
    pub fn new(
        session_id: SessionId,
        topic: impl Into<String>,
        slides: Vec<Slide>,
        quiz: QuizSpec,
    ) -> Result<Self, SessionError> {
        if slides.is_empty() {
            return Err(SessionError::NoSlides);
        }
        Ok(Self {
            session_id,
            topic: topic.into(),
            slides,
            quiz,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSpec {
        &self.quiz
    }
}
