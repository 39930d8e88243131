use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::QuizSpecError;
use crate::model::{Level, OptionKey, QuestionId};

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. The correct answer stays on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(deserialize_with = "options_from_wire")]
    pub options: BTreeMap<OptionKey, String>,
    #[serde(default)]
    pub concept: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = (OptionKey, String)>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: options.into_iter().collect(),
            concept: None,
        }
    }

    #[must_use]
    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }

    #[must_use]
    pub fn has_option(&self, key: &OptionKey) -> bool {
        self.options.contains_key(key)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireOptions {
    Keyed(BTreeMap<OptionKey, String>),
    // Fallback quizzes list options as "A) text".
    Listed(Vec<String>),
}

fn options_from_wire<'de, D>(deserializer: D) -> Result<BTreeMap<OptionKey, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match WireOptions::deserialize(deserializer)? {
        WireOptions::Keyed(map) => Ok(map),
        WireOptions::Listed(items) => items
            .into_iter()
            .zip('A'..='Z')
            .map(|(item, fallback)| {
                let (key, text) = match item.split_once(')') {
                    Some((key, text)) if key.trim().len() == 1 => (key.to_string(), text),
                    _ => (fallback.to_string(), item.as_str()),
                };
                let key = OptionKey::new(key).map_err(serde::de::Error::custom)?;
                Ok((key, text.trim().to_string()))
            })
            .collect(),
    }
}

//
// ─── LEVEL SPEC ────────────────────────────────────────────────────────────────
//

/// Questions and pass rule for one quiz level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "WireLevelSpec")]
pub struct LevelSpec {
    questions: Vec<Question>,
    pass_threshold: u32,
    total: u32,
}

#[derive(Deserialize)]
struct WireLevelSpec {
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    pass_threshold: u32,
    #[serde(default)]
    total: Option<u32>,
}

impl From<WireLevelSpec> for LevelSpec {
    fn from(wire: WireLevelSpec) -> Self {
        let total = wire
            .total
            .unwrap_or_else(|| u32::try_from(wire.questions.len()).unwrap_or(u32::MAX));
        Self {
            questions: wire.questions,
            pass_threshold: wire.pass_threshold,
            total,
        }
    }
}

impl LevelSpec {
    #[must_use]
    pub fn new(questions: Vec<Question>, pass_threshold: u32) -> Self {
        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Self {
            questions,
            pass_threshold,
            total,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// A level with no questions has not been delivered yet.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.questions.is_empty()
    }
}

//
// ─── QUIZ SPEC ─────────────────────────────────────────────────────────────────
//

/// All four quiz levels, indexed by `Level` rather than by string key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireQuizSpec")]
pub struct QuizSpec {
    levels: [LevelSpec; 4],
}

#[derive(Deserialize)]
struct WireQuizSpec {
    #[serde(default)]
    levels: BTreeMap<String, LevelSpec>,
}

impl TryFrom<WireQuizSpec> for QuizSpec {
    type Error = QuizSpecError;

    fn try_from(wire: WireQuizSpec) -> Result<Self, Self::Error> {
        let mut spec = QuizSpec::default();
        for (key, level_spec) in wire.levels {
            let level = key
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(Level::from_number)
                .ok_or_else(|| QuizSpecError::UnknownLevel(key.clone()))?;
            spec.levels[level.index()] = level_spec;
        }
        Ok(spec)
    }
}

impl QuizSpec {
    #[must_use]
    pub fn new(levels: [LevelSpec; 4]) -> Self {
        Self { levels }
    }

    #[must_use]
    pub fn level(&self, level: Level) -> &LevelSpec {
        &self.levels[level.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, &LevelSpec)> {
        Level::ALL.into_iter().zip(self.levels.iter())
    }
}
