use dioxus::prelude::*;
use medlearn_core::model::{Level, OptionKey};
use medlearn_core::stage::Stage;
use services::{ApiError, Call, InMemoryBackend};

use super::actions::FlowIntent;
use super::loading::LoadingScreen;
use super::test_harness::{FlowHarness, drive_dom, setup_flow_harness};

fn option(key: &str) -> FlowIntent {
    FlowIntent::SelectOption(OptionKey::new(key).expect("option key"))
}

async fn start_lesson(harness: &mut FlowHarness, topic: &str) {
    harness.dispatch(FlowIntent::SubmitTopic(topic.to_string()));
    harness.drive_async().await;
    assert_eq!(harness.machine().stage(), Stage::Learning);
}

fn walk_slides(harness: &mut FlowHarness) {
    while harness.machine().stage() == Stage::Learning {
        harness.dispatch(FlowIntent::NextSlide);
    }
}

async fn answer_level(harness: &mut FlowHarness, key: &str) {
    harness.dispatch(option(key));
    harness.dispatch(FlowIntent::Advance);
    harness.drive_async().await;
}

#[tokio::test(flavor = "current_thread")]
async fn loading_screen_smoke_renders_first_step() {
    let mut dom = VirtualDom::new(LoadingScreen);
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Generating Your Lesson"), "missing title in {html}");
    assert!(html.contains("Analyzing medical topic..."), "missing first step in {html}");
    assert!(html.contains("Preparing quiz questions..."), "missing last step in {html}");
    assert!(html.contains("Step 1 of 5"), "missing step label in {html}");
    assert!(html.contains("width: 20%"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn submitting_a_topic_shows_slides() {
    let mut harness = setup_flow_harness(InMemoryBackend::new());
    harness.dispatch(FlowIntent::SubmitTopic("  Hypertension ".to_string()));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Introduction to Hypertension"), "missing slide in {html}");
    assert!(html.contains("Slide 1 of 4"), "missing progress in {html}");
    assert!(html.contains("placehold.co"), "missing image in {html}");
    assert!(html.contains("New Topic"), "missing restart in {html}");
    assert_eq!(harness.backend.calls(Call::Generate), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn blank_topic_is_ignored() {
    let mut harness = setup_flow_harness(InMemoryBackend::new());
    harness.dispatch(FlowIntent::SubmitTopic("   ".to_string()));
    harness.drive_async().await;

    assert_eq!(harness.machine().stage(), Stage::Input);
    assert_eq!(harness.backend.calls(Call::Generate), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn slides_navigate_and_open_the_quiz() {
    let mut harness = setup_flow_harness(InMemoryBackend::new());
    start_lesson(&mut harness, "Asthma").await;

    harness.dispatch(FlowIntent::PreviousSlide);
    assert_eq!(harness.machine().walker().map(|w| w.current()), Some(0));

    harness.dispatch(FlowIntent::SelectSlide(3));
    let html = harness.render();
    assert!(html.contains("Summary and Key Takeaways"), "missing last slide in {html}");
    assert!(html.contains("Take Quiz"), "missing quiz button in {html}");

    harness.dispatch(FlowIntent::NextSlide);
    let html = harness.render();
    assert_eq!(harness.machine().stage(), Stage::Quiz);
    assert!(html.contains("Level 1: Beginner"), "missing level in {html}");
    assert!(html.contains("Question 1 of 1"), "missing progress in {html}");
    assert!(html.contains("Pass: 1/1"), "missing threshold in {html}");
    assert!(html.contains("What is the main focus of Asthma?"), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn four_passed_levels_reach_mastery_and_restart() {
    let mut harness = setup_flow_harness(InMemoryBackend::new());
    start_lesson(&mut harness, "Stroke").await;
    walk_slides(&mut harness);

    for next in [Level::Intermediate, Level::Advanced, Level::Expert] {
        answer_level(&mut harness, "A").await;
        let html = harness.render();
        assert!(html.contains("Passed!"), "missing pass in {html}");
        let proceed = format!("Proceed to Level {}", next.number());
        assert!(html.contains(&proceed), "missing {proceed} in {html}");
        harness.dispatch(FlowIntent::NextLevel);
    }

    answer_level(&mut harness, "A").await;
    let html = harness.render();
    assert_eq!(harness.machine().stage(), Stage::Complete);
    assert!(html.contains("Mastery Achieved!"), "missing mastery in {html}");
    assert!(html.contains("Stroke"), "missing topic in {html}");
    assert_eq!(harness.backend.calls(Call::Evaluate), 4);

    harness.dispatch(FlowIntent::Restart);
    let html = harness.render();
    assert!(html.contains("What do you want to learn?"), "missing input in {html}");
    assert!(harness.machine().session().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn failed_level_offers_retry_and_review() {
    let mut harness = setup_flow_harness(InMemoryBackend::new());
    start_lesson(&mut harness, "COPD").await;
    walk_slides(&mut harness);

    answer_level(&mut harness, "B").await;
    let html = harness.render();
    assert!(html.contains("Level 1: Keep Trying!"), "missing heading in {html}");
    assert!(html.contains("Score: 0/1 (0%)"), "missing score in {html}");
    assert!(html.contains("Retry Level"), "missing retry in {html}");
    assert!(html.contains("Review Content"), "missing review in {html}");
    assert!(html.contains("This is a foundational question"), "missing explanation in {html}");

    harness.dispatch(FlowIntent::RetryLevel);
    assert!(harness.render().contains("Question 1 of 1"));

    answer_level(&mut harness, "C").await;
    harness.dispatch(FlowIntent::ReviewSlides);
    let html = harness.render();
    assert_eq!(harness.machine().stage(), Stage::Learning);
    assert!(html.contains("Slide 1 of 4"), "missing first slide in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn grading_failure_blocks_until_acknowledged() {
    let backend = InMemoryBackend::new();
    let mut harness = setup_flow_harness(backend.clone());
    start_lesson(&mut harness, "Pneumonia").await;
    walk_slides(&mut harness);

    backend.fail_next(Call::Evaluate, ApiError::Evaluation("Failed to evaluate quiz".into()));
    answer_level(&mut harness, "A").await;
    let html = harness.render();
    assert!(html.contains("Evaluation failed"), "missing dialog in {html}");
    assert!(html.contains("Failed to evaluate quiz"), "missing message in {html}");

    harness.dispatch(FlowIntent::AcknowledgeError);
    assert!(!harness.render().contains("Evaluation failed"));

    harness.dispatch(FlowIntent::Advance);
    harness.drive_async().await;
    assert!(harness.render().contains("Level 1: Passed!"));
    assert_eq!(backend.calls(Call::Evaluate), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn generation_failure_returns_to_input_with_banner() {
    let backend = InMemoryBackend::new();
    backend.fail_next(
        Call::Generate,
        ApiError::Generation("Failed to generate learning content: quota".into()),
    );
    let mut harness = setup_flow_harness(backend);
    harness.dispatch(FlowIntent::SubmitTopic("Heart Failure".to_string()));
    harness.drive_async().await;

    let html = harness.render();
    assert_eq!(harness.machine().stage(), Stage::Input);
    assert!(html.contains("Failed to generate learning content: quota"), "missing banner in {html}");
    assert!(html.contains("What do you want to learn?"), "missing input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn restart_during_generation_returns_to_input() {
    let mut harness = setup_flow_harness(InMemoryBackend::new());
    harness.dispatch(FlowIntent::SubmitTopic("Diabetes Mellitus Type 2".to_string()));
    harness.dispatch(FlowIntent::Restart);
    harness.drive_async().await;

    let machine = harness.machine();
    assert_eq!(machine.stage(), Stage::Input);
    assert!(machine.session().is_none());
    assert_eq!(machine.error(), None);
}
