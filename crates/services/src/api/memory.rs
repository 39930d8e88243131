use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use url::Url;

use medlearn_core::model::{
    AnswerSet, Level, LevelResult, LevelSpec, MediaRef, OptionKey, Question, QuestionId,
    QuestionOutcome, QuizSpec, Session, SessionId, Slide,
};

use super::BackendPort;
use crate::error::{ApiError, GENERATION_FAILED, SESSION_NOT_FOUND};

/// Correct option and explanation for one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedAnswer {
    pub correct: OptionKey,
    pub explanation: String,
}

pub type AnswerKey = BTreeMap<QuestionId, KeyedAnswer>;

/// Backend operation, for queued failures and call counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Call {
    Generate,
    Evaluate,
    GetSession,
    Ping,
}

#[derive(Clone, Debug)]
struct StoredLesson {
    session: Session,
    key: AnswerKey,
}

#[derive(Debug, Default)]
struct State {
    lessons: HashMap<SessionId, StoredLesson>,
    next_id: u64,
    failures: HashMap<Call, VecDeque<ApiError>>,
    calls: HashMap<Call, usize>,
}

/// In-process backend: serves templated lessons and grades them like the real
/// grader does. Used for `--demo` and in tests.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not wedge the others.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store a lesson so it can be fetched and graded.
    pub fn insert(&self, session: Session, key: AnswerKey) {
        self.lock()
            .lessons
            .insert(session.session_id().clone(), StoredLesson { session, key });
    }

    /// Make the next `call` fail with `error`. Failures queue per call kind.
    pub fn fail_next(&self, call: Call, error: ApiError) {
        self.lock()
            .failures
            .entry(call)
            .or_default()
            .push_back(error);
    }

    #[must_use]
    pub fn calls(&self, call: Call) -> usize {
        self.lock().calls.get(&call).copied().unwrap_or(0)
    }

    fn enter(&self, call: Call) -> Result<MutexGuard<'_, State>, ApiError> {
        let mut state = self.lock();
        *state.calls.entry(call).or_default() += 1;
        if let Some(error) = state.failures.get_mut(&call).and_then(VecDeque::pop_front) {
            return Err(error);
        }
        Ok(state)
    }
}

#[async_trait]
impl BackendPort for InMemoryBackend {
    async fn generate_learning(&self, query: &str) -> Result<Session, ApiError> {
        let mut state = self.enter(Call::Generate)?;
        state.next_id += 1;
        let session_id = SessionId::new(format!("demo-{}", state.next_id))
            .map_err(|_| ApiError::Generation(GENERATION_FAILED.into()))?;
        let (session, key) = templated_lesson(session_id, query.trim())?;
        tracing::debug!(session_id = %session.session_id(), "templated lesson stored");
        state.lessons.insert(
            session.session_id().clone(),
            StoredLesson {
                session: session.clone(),
                key,
            },
        );
        Ok(session)
    }

    async fn evaluate_quiz(
        &self,
        session_id: &SessionId,
        level: Level,
        answers: &AnswerSet,
    ) -> Result<LevelResult, ApiError> {
        let state = self.enter(Call::Evaluate)?;
        let lesson = state
            .lessons
            .get(session_id)
            .ok_or_else(|| ApiError::Evaluation(SESSION_NOT_FOUND.into()))?;
        Ok(grade(level, lesson.session.quiz().level(level), &lesson.key, answers))
    }

    async fn get_session(&self, session_id: &SessionId) -> Result<Session, ApiError> {
        let state = self.enter(Call::GetSession)?;
        state
            .lessons
            .get(session_id)
            .map(|lesson| lesson.session.clone())
            .ok_or_else(|| ApiError::NotFound(SESSION_NOT_FOUND.into()))
    }

    async fn ping(&self) -> Result<serde_json::Value, ApiError> {
        let state = self.enter(Call::Ping)?;
        Ok(serde_json::json!({
            "status": "healthy",
            "backend": "in-memory",
            "sessions": state.lessons.len(),
        }))
    }
}

/// Score a level the way the backend grader does: one point per matching
/// answer, pass at the threshold, mastery only for a pass at level 4.
#[must_use]
pub fn grade(level: Level, spec: &LevelSpec, key: &AnswerKey, answers: &AnswerSet) -> LevelResult {
    let per_question: Vec<QuestionOutcome> = spec
        .questions()
        .iter()
        .map(|question| {
            let user_answer = answers.get(question.id);
            let keyed = key.get(&question.id);
            let is_correct = match (user_answer, keyed) {
                (Some(user), Some(keyed)) => *user == keyed.correct,
                _ => false,
            };
            QuestionOutcome {
                question_id: question.id,
                question: Some(question.prompt.clone()),
                user_answer: user_answer.map(ToString::to_string),
                correct_answer: keyed.map(|k| k.correct.to_string()).unwrap_or_default(),
                is_correct,
                explanation: keyed.map(|k| k.explanation.clone()).unwrap_or_default(),
                concept: question.concept.clone(),
            }
        })
        .collect();

    let score = u32::try_from(per_question.iter().filter(|q| q.is_correct).count())
        .unwrap_or(u32::MAX);
    let total = spec.total();
    let passed = score >= spec.pass_threshold();
    let percentage = LevelResult::rounded_percentage(score, total);

    LevelResult {
        level,
        level_name: Some(level.name().to_string()),
        passed,
        score,
        total,
        pass_threshold: spec.pass_threshold(),
        percentage: Some(percentage),
        per_question,
        mastery_achieved: passed && level.is_final(),
    }
}

//
// ─── TEMPLATED LESSON ──────────────────────────────────────────────────────────
//

const SLIDES: [(&str, [&str; 3], &str); 4] = [
    (
        "Introduction to {topic}",
        [
            "Overview of key concepts",
            "Importance in medical practice",
            "Historical context",
        ],
        "Welcome to this lesson on {topic}. We'll explore the fundamental concepts and their significance in modern medicine.",
    ),
    (
        "Key Mechanisms",
        [
            "Primary biological processes",
            "Cellular interactions",
            "Molecular pathways",
        ],
        "Let's examine the underlying mechanisms that drive these processes at the cellular and molecular level.",
    ),
    (
        "Clinical Applications",
        [
            "Diagnostic approaches",
            "Treatment options",
            "Patient management",
        ],
        "Understanding these concepts helps us make informed clinical decisions and provide better patient care.",
    ),
    (
        "Summary and Key Takeaways",
        [
            "Main points review",
            "Clinical implications",
            "Further learning resources",
        ],
        "To summarize, we've covered the essential aspects of this topic and their practical applications in healthcare.",
    ),
];

const QUESTIONS: [(&str, [&str; 4], &str, &str); 4] = [
    (
        "What is the main focus of {topic}?",
        ["Basic concept", "Advanced theory", "Practical application", "Historical context"],
        "This is a foundational question about the topic.",
        "Foundations",
    ),
    (
        "How does {topic} relate to clinical practice?",
        ["Direct application", "Theoretical only", "Research purposes", "Historical interest"],
        "Understanding the clinical relevance is important.",
        "Clinical relevance",
    ),
    (
        "What would be an appropriate application of {topic}?",
        ["Patient care", "Administrative tasks", "Documentation", "Billing"],
        "Applying knowledge to patient care scenarios.",
        "Application",
    ),
    (
        "How would you integrate {topic} into a treatment plan?",
        [
            "Evidence-based approach",
            "Traditional methods only",
            "Experimental only",
            "Not applicable",
        ],
        "Integration requires critical thinking and analysis.",
        "Integration",
    ),
];

const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

fn placeholder_image(title: &str) -> Result<MediaRef, ApiError> {
    let url = Url::parse_with_params("https://placehold.co/800x450/png", [("text", title)])
        .map_err(|_| ApiError::Generation(GENERATION_FAILED.into()))?;
    Ok(MediaRef::Url(url))
}

fn option_key(raw: &str) -> Result<OptionKey, ApiError> {
    OptionKey::new(raw).map_err(|_| ApiError::Generation(GENERATION_FAILED.into()))
}

/// Four slides and one question per level, with "A" always correct.
fn templated_lesson(session_id: SessionId, topic: &str) -> Result<(Session, AnswerKey), ApiError> {
    let fill = |template: &str| template.replace("{topic}", topic);

    let slides = SLIDES
        .into_iter()
        .map(|(title, bullets, narration)| -> Result<Slide, ApiError> {
            let title = fill(title);
            Ok(Slide {
                image_url: placeholder_image(&title)?,
                title,
                bullet_points: bullets.iter().map(ToString::to_string).collect(),
                audio_url: None,
                narration: fill(narration),
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    let mut key = AnswerKey::new();
    let mut levels: [LevelSpec; 4] = Default::default();
    for (level, (prompt, options, explanation, concept)) in Level::ALL.into_iter().zip(QUESTIONS) {
        let id = QuestionId::new(u64::from(level.number()));
        let options = OPTION_KEYS
            .iter()
            .zip(options)
            .map(|(k, text)| -> Result<(OptionKey, String), ApiError> {
                Ok((option_key(k)?, text.to_string()))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;
        let question = Question::new(id, fill(prompt), options).with_concept(concept);
        key.insert(
            id,
            KeyedAnswer {
                correct: option_key("A")?,
                explanation: explanation.to_string(),
            },
        );
        levels[level.index()] = LevelSpec::new(vec![question], 1);
    }

    let session = Session::new(session_id, topic, slides, QuizSpec::new(levels))
        .map_err(|_| ApiError::Generation(GENERATION_FAILED.into()))?;
    Ok((session, key))
}
