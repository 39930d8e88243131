use dioxus::prelude::*;

use super::actions::FlowIntent;

const SUGGESTED_TOPICS: [&str; 8] = [
    "Myocardial Infarction",
    "Diabetes Mellitus Type 2",
    "Pneumonia",
    "Hypertension",
    "Stroke",
    "Asthma",
    "Heart Failure",
    "COPD",
];

const FEATURES: [(&str, &str, &str); 3] = [
    ("📊", "Visual Slides", "AI-generated diagrams & explanations"),
    ("🔊", "Audio Narration", "Listen while you learn"),
    ("📝", "Progressive Quiz", "4 levels from basic to expert"),
];

#[component]
pub fn InputScreen(dispatch: Callback<FlowIntent>) -> Element {
    let mut query = use_signal(String::new);
    let mut submitted = use_signal(|| false);
    let blank = query.read().trim().is_empty();

    let submit = use_callback(move |()| {
        let text = query.read().trim().to_string();
        if text.is_empty() {
            return;
        }
        submitted.set(true);
        dispatch.call(FlowIntent::SubmitTopic(text));
    });

    let button_label = if submitted() { "Generating Lesson..." } else { "Generate Lesson" };

    rsx! {
        div { class: "query",
            div { class: "query__intro",
                h2 { "What do you want to learn?" }
                p {
                    "Enter any medical topic and get an interactive visual lesson with "
                    "progressive quizzes to test your knowledge."
                }
            }
            form {
                class: "query__form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submit.call(());
                },
                textarea {
                    class: "query__input",
                    id: "query-input",
                    rows: "3",
                    placeholder: "e.g., Explain the pathophysiology of heart failure",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.data.key() == Key::Enter && !evt.data.modifiers().contains(Modifiers::SHIFT) {
                            evt.prevent_default();
                            submit.call(());
                        }
                    },
                }
                button {
                    class: "btn btn-primary query__submit",
                    id: "query-submit",
                    r#type: "submit",
                    disabled: blank || submitted(),
                    "{button_label}"
                }
            }
            div { class: "query__topics",
                p { class: "query__topics-label", "Or try these popular topics:" }
                div { class: "query__topic-list",
                    for topic in SUGGESTED_TOPICS {
                        button {
                            key: "{topic}",
                            class: "topic-chip",
                            r#type: "button",
                            onclick: move |_| query.set(topic.to_string()),
                            "{topic}"
                        }
                    }
                }
            }
            div { class: "query__features",
                for (icon, title, blurb) in FEATURES {
                    div { key: "{title}", class: "feature-card",
                        span { class: "feature-card__icon", "{icon}" }
                        h3 { "{title}" }
                        p { "{blurb}" }
                    }
                }
            }
        }
    }
}
