use dioxus::prelude::*;
use medlearn_core::progression::QuizPhase;
use medlearn_core::stage::StageMachine;

use crate::vm::{
    LevelBadgeVm, OptionVm, QuestionVm, ResultVm, level_badges, level_class, map_question, map_result,
};

use super::actions::FlowIntent;

enum QuizScreenVm {
    Pending,
    Question(QuestionVm),
    Result(ResultVm),
}

#[component]
pub fn QuizScreen(machine: Signal<StageMachine>, dispatch: Callback<FlowIntent>) -> Element {
    let state = machine.read();
    let Some(quiz) = state.quiz() else {
        return rsx! { p { "Loading quiz..." } };
    };
    let badges = level_badges(quiz);
    let level_label = quiz.level().to_string();
    let scheme = level_class(quiz.level());
    let failure = quiz.failure().map(str::to_string);
    let screen = match quiz.phase() {
        QuizPhase::Reviewing(result) => QuizScreenVm::Result(map_result(result, quiz.level_spec())),
        QuizPhase::Answering | QuizPhase::Submitting => {
            map_question(quiz).map_or(QuizScreenVm::Pending, QuizScreenVm::Question)
        }
    };
    drop(state);

    rsx! {
        div { class: "quiz {scheme}",
            match screen {
                QuizScreenVm::Pending => rsx! {
                    div { class: "quiz__pending",
                        span { class: "quiz__spinner", "⏳" }
                        p { "Loading quiz..." }
                    }
                },
                QuizScreenVm::Question(vm) => rsx! {
                    QuestionCard { badges, level_label, vm, dispatch }
                },
                QuizScreenVm::Result(vm) => rsx! {
                    ResultPanel { vm, dispatch }
                },
            }
            if let Some(message) = failure {
                div { class: "dialog-backdrop",
                    div {
                        class: "dialog",
                        role: "alertdialog",
                        aria_modal: "true",
                        aria_labelledby: "evaluation-error-title",
                        h3 { id: "evaluation-error-title", "Evaluation failed" }
                        p { class: "dialog__message", "{message}" }
                        button {
                            class: "btn btn-primary",
                            id: "evaluation-error-ok",
                            r#type: "button",
                            onclick: move |_| dispatch.call(FlowIntent::AcknowledgeError),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    badges: Vec<LevelBadgeVm>,
    level_label: String,
    vm: QuestionVm,
    dispatch: Callback<FlowIntent>,
) -> Element {
    let locked = vm.submitting;

    rsx! {
        div { class: "quiz__card",
            div { class: "quiz__header",
                div { class: "level-badges",
                    for badge in badges.iter() {
                        div { key: "{badge.tooltip}", class: "{badge.class}", title: "{badge.tooltip}",
                            "{badge.label}"
                        }
                    }
                }
                span { class: "quiz__level", "{level_label}" }
            }
            div { class: "quiz__progress",
                div { class: "quiz__progress-labels",
                    span { "{vm.progress_label}" }
                    span { "{vm.pass_label}" }
                }
                div { class: "progress",
                    div { class: "progress__bar", style: "width: {vm.progress_percent}%" }
                }
            }
            div { class: "question",
                h3 { class: "question__prompt", "{vm.prompt}" }
                if let Some(concept) = vm.concept.as_ref() {
                    p { class: "question__concept", "💡 Concept: {concept}" }
                }
            }
            div { class: "options",
                for option in vm.options.iter() {
                    OptionButton { key: "{option.key}", option: option.clone(), locked, dispatch }
                }
            }
            button {
                class: "btn btn-primary quiz__submit",
                id: "quiz-submit",
                r#type: "button",
                disabled: !vm.can_submit,
                onclick: move |_| dispatch.call(FlowIntent::Advance),
                "{vm.button_label}"
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, locked: bool, dispatch: Callback<FlowIntent>) -> Element {
    let class = if option.selected { "option option--selected" } else { "option" };
    let label = option.key.to_string();
    let chosen = option.key;

    rsx! {
        button {
            class,
            r#type: "button",
            disabled: locked,
            onclick: move |_| dispatch.call(FlowIntent::SelectOption(chosen.clone())),
            span { class: "option__key", "{label}" }
            span { class: "option__text", "{option.text}" }
        }
    }
}

#[component]
fn ResultPanel(vm: ResultVm, dispatch: Callback<FlowIntent>) -> Element {
    let header_class = if vm.passed {
        "result__header result__header--passed"
    } else {
        "result__header result__header--failed"
    };

    rsx! {
        div { class: "result",
            div { class: header_class,
                div { class: "result__emoji", "{vm.emoji}" }
                h2 { "{vm.heading}" }
                p { class: "result__score", "{vm.score_label}" }
                p { class: "result__required", "{vm.required_label}" }
            }
            div { class: "result__body",
                h3 { "📋 Question Review" }
                div { class: "result__rows",
                    for row in vm.rows.iter() {
                        div {
                            key: "{row.key}",
                            class: if row.correct { "result-row result-row--correct" } else { "result-row result-row--wrong" },
                            span { class: "result-row__marker", if row.correct { "✅" } else { "❌" } }
                            div { class: "result-row__content",
                                p { class: "result-row__prompt", "{row.prompt}" }
                                p { class: "result-row__answers",
                                    "Your answer: "
                                    span { class: "result-row__user", "{row.user_answer}" }
                                    if let Some(correct) = row.correct_answer.as_ref() {
                                        " | Correct: "
                                        span { class: "result-row__correct", "{correct}" }
                                    }
                                }
                                if let Some(html) = row.explanation_html.as_ref() {
                                    div { class: "result-row__explanation",
                                        span { class: "result-row__explanation-label", "💡 Explanation: " }
                                        div { dangerous_inner_html: "{html}" }
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "result__actions",
                    if vm.passed {
                        if let Some(label) = vm.next_level_label.as_ref() {
                            button {
                                class: "btn btn-primary",
                                id: "result-next-level",
                                r#type: "button",
                                onclick: move |_| dispatch.call(FlowIntent::NextLevel),
                                "{label} →"
                            }
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            id: "result-retry",
                            r#type: "button",
                            onclick: move |_| dispatch.call(FlowIntent::RetryLevel),
                            "🔄 Retry Level"
                        }
                        button {
                            class: "btn btn-primary",
                            id: "result-review",
                            r#type: "button",
                            onclick: move |_| dispatch.call(FlowIntent::ReviewSlides),
                            "📖 Review Content"
                        }
                    }
                }
                if vm.mastery {
                    div { class: "result__mastery",
                        div { "🏆" }
                        p { class: "result__mastery-title", "Mastery Achieved!" }
                        p { "Congratulations! You've completed all 4 levels!" }
                    }
                }
            }
        }
    }
}
