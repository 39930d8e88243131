mod answers;
mod ids;
mod level;
mod media;
mod quiz;
mod result;
mod session;
mod slide;

pub use answers::AnswerSet;
pub use ids::{OptionKey, ParseIdError, QuestionId, SessionId};
pub use level::Level;
pub use media::{MediaError, MediaRef};
pub use quiz::{LevelSpec, Question, QuizSpec};
pub use result::{LevelResult, QuestionOutcome};
pub use session::Session;
pub use slide::Slide;
