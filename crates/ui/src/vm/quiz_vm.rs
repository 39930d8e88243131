use medlearn_core::model::{Level, LevelResult, LevelSpec, OptionKey};
use medlearn_core::progression::{QuestionState, QuizProgression};

use crate::vm::markdown_vm::explanation_html;

#[must_use]
pub fn level_icon(level: Level) -> &'static str {
    match level {
        Level::Beginner => "🌱",
        Level::Intermediate => "📈",
        Level::Advanced => "🔥",
        Level::Expert => "👑",
    }
}

/// CSS modifier carrying the level's colour scheme.
#[must_use]
pub fn level_class(level: Level) -> &'static str {
    match level {
        Level::Beginner => "level--beginner",
        Level::Intermediate => "level--intermediate",
        Level::Advanced => "level--advanced",
        Level::Expert => "level--expert",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelBadgeVm {
    pub label: &'static str,
    pub class: String,
    pub tooltip: String,
}

#[must_use]
pub fn level_badges(quiz: &QuizProgression) -> Vec<LevelBadgeVm> {
    Level::ALL
        .into_iter()
        .map(|level| {
            let completed = quiz.is_completed(level);
            let state = if level == quiz.level() {
                "level-badge--current"
            } else if completed {
                "level-badge--done"
            } else {
                "level-badge--locked"
            };
            LevelBadgeVm {
                label: if completed { "✓" } else { level_icon(level) },
                class: format!("level-badge {state} {}", level_class(level)),
                tooltip: level.to_string(),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub level_label: String,
    pub progress_label: String,
    pub pass_label: String,
    pub progress_percent: u32,
    pub prompt: String,
    pub concept: Option<String>,
    pub options: Vec<OptionVm>,
    pub submitting: bool,
    pub can_submit: bool,
    pub button_label: &'static str,
}

/// The question on screen, or `None` while the level has no questions.
#[must_use]
pub fn map_question(quiz: &QuizProgression) -> Option<QuestionVm> {
    let QuestionState::Ready {
        question,
        number,
        of,
    } = quiz.current()
    else {
        return None;
    };
    let spec = quiz.level_spec();
    let selected = quiz.selected();
    let submitting = quiz.is_submitting();

    let options = question
        .options
        .iter()
        .map(|(key, text)| OptionVm {
            key: key.clone(),
            text: text.clone(),
            selected: selected == Some(key),
        })
        .collect();

    let button_label = if submitting {
        "Evaluating..."
    } else if quiz.is_last_question() {
        "Submit Level ✓"
    } else {
        "Next Question →"
    };

    Some(QuestionVm {
        level_label: quiz.level().to_string(),
        progress_label: format!("Question {number} of {of}"),
        pass_label: format!("Pass: {}/{}", spec.pass_threshold(), spec.total()),
        progress_percent: u32::try_from(number * 100 / of).unwrap_or(100),
        prompt: question.prompt.clone(),
        concept: question.concept.clone(),
        options,
        submitting,
        can_submit: selected.is_some() && !submitting && quiz.failure().is_none(),
        button_label,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub key: u64,
    pub correct: bool,
    pub prompt: String,
    pub user_answer: String,
    pub correct_answer: Option<String>,
    pub explanation_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub passed: bool,
    pub emoji: &'static str,
    pub heading: String,
    pub score_label: String,
    pub required_label: String,
    pub rows: Vec<ResultRowVm>,
    pub next_level_label: Option<String>,
    pub mastery: bool,
}

#[must_use]
pub fn map_result(result: &LevelResult, spec: &LevelSpec) -> ResultVm {
    let level = result.level;
    let mastery = result.passed && level.is_final();

    let rows = result
        .per_question
        .iter()
        .enumerate()
        .map(|(i, outcome)| {
            let prompt = outcome.question.clone().or_else(|| {
                spec.questions()
                    .iter()
                    .find(|q| q.id == outcome.question_id)
                    .map(|q| q.prompt.clone())
            });
            ResultRowVm {
                key: outcome.question_id.value(),
                correct: outcome.is_correct,
                prompt: format!("Q{}: {}", i + 1, prompt.unwrap_or_default()),
                user_answer: outcome
                    .user_answer
                    .clone()
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| "Not answered".to_string()),
                correct_answer: (!outcome.is_correct).then(|| outcome.correct_answer.clone()),
                explanation_html: explanation_html(&outcome.explanation),
            }
        })
        .collect();

    ResultVm {
        passed: result.passed,
        emoji: if result.passed { "🎉" } else { "💪" },
        heading: format!(
            "Level {}: {}",
            level.number(),
            if result.passed { "Passed!" } else { "Keep Trying!" }
        ),
        score_label: format!(
            "Score: {}/{} ({}%)",
            result.score,
            result.total,
            result.percentage()
        ),
        required_label: format!(
            "Required: {}/{} to pass",
            result.pass_threshold, result.total
        ),
        rows,
        next_level_label: level
            .next()
            .filter(|_| result.passed)
            .map(|next| format!("Proceed to Level {}", next.number())),
        mastery,
    }
}
