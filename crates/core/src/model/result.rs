use serde::Deserialize;

use crate::model::{Level, QuestionId};

/// Grading of a single question within a level submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub concept: Option<String>,
}

/// Grading result for one level submission, as produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LevelResult {
    pub level: Level,
    #[serde(default)]
    pub level_name: Option<String>,
    pub passed: bool,
    pub score: u32,
    pub total: u32,
    pub pass_threshold: u32,
    #[serde(default)]
    pub percentage: Option<u32>,
    #[serde(default, rename = "results")]
    pub per_question: Vec<QuestionOutcome>,
    #[serde(default)]
    pub mastery_achieved: bool,
}

impl LevelResult {
    /// Percentage as reported, else `round(score / total * 100)`.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if let Some(p) = self.percentage {
            return p;
        }
        Self::rounded_percentage(self.score, self.total)
    }

    /// `round(score / total * 100)`, or 0 for an empty level. Saturates at
    /// `u32::MAX` when a malformed score exceeds the total by that much.
    #[must_use]
    pub fn rounded_percentage(score: u32, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        let (score, total) = (u64::from(score), u64::from(total));
        u32::try_from((score * 200 + total) / (total * 2)).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.per_question.iter().filter(|q| !q.is_correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_grading_payload() {
        let result: LevelResult = serde_json::from_value(json!({
            "level": 1,
            "level_name": "Beginner",
            "passed": true,
            "score": 4,
            "total": 5,
            "pass_threshold": 4,
            "percentage": 80,
            "results": [
                { "question_id": 5, "question": "Q5?", "user_answer": "B", "correct_answer": "C",
                  "is_correct": false, "explanation": "Because.", "concept": "" }
            ],
            "mastery_achieved": false
        }))
        .unwrap();
        assert_eq!(result.level, Level::Beginner);
        assert_eq!(result.percentage(), 80);
        assert_eq!(result.incorrect_count(), 1);
    }

    #[test]
    fn percentage_falls_back_to_rounded_ratio() {
        let mut result: LevelResult = serde_json::from_value(json!({
            "level": 2, "passed": false, "score": 2, "total": 3, "pass_threshold": 3
        }))
        .unwrap();
        assert_eq!(result.percentage(), 67);

        result.score = 0;
        result.total = 0;
        assert_eq!(result.percentage(), 0);
    }

    #[test]
    fn percentage_of_large_counts_does_not_overflow() {
        let result: LevelResult = serde_json::from_value(json!({
            "level": 1, "passed": true, "score": 30_000_000, "total": 30_000_000, "pass_threshold": 1
        }))
        .unwrap();
        assert_eq!(result.percentage(), 100);
        assert_eq!(LevelResult::rounded_percentage(u32::MAX, u32::MAX), 100);
        assert_eq!(LevelResult::rounded_percentage(u32::MAX / 2, u32::MAX), 50);
        assert_eq!(LevelResult::rounded_percentage(u32::MAX, 1), u32::MAX);
    }
}
