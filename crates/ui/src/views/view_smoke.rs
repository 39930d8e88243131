use medlearn_core::model::SessionId;
use services::{ApiError, BackendPort, Call, InMemoryBackend};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_resume};

#[tokio::test(flavor = "current_thread")]
async fn status_view_smoke_renders_payload() {
    let mut harness = setup_view_harness(ViewKind::Status, InMemoryBackend::new());
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Backend: in-memory"), "missing label in {html}");
    assert!(html.contains("Backend is running"), "missing ok in {html}");
    assert!(html.contains("healthy"), "missing payload in {html}");
    assert_eq!(harness.backend.calls(Call::Ping), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn status_view_smoke_renders_unreachable_backend() {
    let backend = InMemoryBackend::new();
    backend.fail_next(Call::Ping, ApiError::Unavailable("Backend is unavailable".into()));
    let mut harness = setup_view_harness(ViewKind::Status, backend);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("The backend is not reachable."), "missing error in {html}");
    assert!(html.contains("Check again"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn learn_view_smoke_starts_on_topic_input() {
    let mut harness = setup_view_harness(ViewKind::Learn, InMemoryBackend::new());
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("What do you want to learn?"), "missing heading in {html}");
    assert!(html.contains("Myocardial Infarction"), "missing suggestion in {html}");
    assert!(!html.contains("New Topic"), "restart shown on input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn learn_view_smoke_reopens_launch_session() {
    let backend = InMemoryBackend::new();
    let session = backend.generate_learning("Sepsis").await.expect("seed lesson");
    let session_id = session.session_id().clone();

    let mut harness =
        setup_view_harness_with_resume(ViewKind::Learn, backend, Some(session_id));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Introduction to Sepsis"), "missing first slide in {html}");
    assert!(html.contains("Slide 1 of 4"), "missing progress in {html}");
    assert_eq!(harness.backend.calls(Call::GetSession), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn learn_view_smoke_unknown_launch_session_shows_banner() {
    let mut harness = setup_view_harness_with_resume(
        ViewKind::Learn,
        InMemoryBackend::new(),
        Some(SessionId::new("missing").expect("session id")),
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Session not found"), "missing banner in {html}");
    assert!(html.contains("What do you want to learn?"), "missing input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn status_view_smoke_shows_launch_session() {
    let mut harness = setup_view_harness_with_resume(
        ViewKind::Status,
        InMemoryBackend::new(),
        Some(SessionId::new("sess-7").expect("session id")),
    );
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Resumed session: sess-7"), "missing session in {html}");
}
