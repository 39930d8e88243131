use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::{OptionKey, Question, QuestionId};

/// Chosen option per question for one level attempt, in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(QuestionId, OptionKey)>,
}

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Re-answering a question replaces its entry in place.
    pub fn record(&mut self, question: QuestionId, option: OptionKey) {
        match self.entries.iter_mut().find(|(id, _)| *id == question) {
            Some(entry) => entry.1 = option,
            None => self.entries.push((question, option)),
        }
    }

    #[must_use]
    pub fn get(&self, question: QuestionId) -> Option<&OptionKey> {
        self.entries
            .iter()
            .find(|(id, _)| *id == question)
            .map(|(_, option)| option)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &OptionKey)> {
        self.entries.iter().map(|(id, option)| (*id, option))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True when there is exactly one answer per question, in the questions' order.
    #[must_use]
    pub fn covers(&self, questions: &[Question]) -> bool {
        self.entries.len() == questions.len()
            && self
                .entries
                .iter()
                .zip(questions)
                .all(|((id, _), question)| *id == question.id)
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, option) in &self.entries {
            map.serialize_entry(id, option)?;
        }
        map.end()
    }
}
