//! Wire contract of `HttpBackend` against a stub backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use medlearn_core::model::{AnswerSet, Level, OptionKey, QuestionId, SessionId};
use services::{ApiConfig, ApiError, BackendPort, HttpBackend};

#[derive(Clone, Default)]
struct Stub {
    last_evaluation: Arc<Mutex<Option<Value>>>,
}

fn lesson_body(session_id: &str) -> Value {
    json!({
        "session_id": session_id,
        "content": {
            "topic": "Hypertension",
            "slides": [
                {
                    "title": "Introduction to Hypertension",
                    "bullet_points": ["Definition", "Epidemiology"],
                    "image_url": "/static/images/intro.png",
                    "audio_url": "/static/audio/intro.mp3",
                    "narration": "Welcome."
                },
                {
                    "title": "Key Mechanisms",
                    "bullet_points": [],
                    "image_url": "https://images.example.org/raas.png",
                    "audio_url": null,
                    "narration": ""
                }
            ]
        },
        "quiz_data": {
            "levels": {
                "1": {
                    "level": 1,
                    "level_name": "Beginner",
                    "questions": [{
                        "id": 1,
                        "question": "Which value defines stage 1 hypertension?",
                        "options": { "A": "120/80", "B": "130/80", "C": "140/90", "D": "160/100" },
                        "correct_answer": "B",
                        "concept": "Thresholds"
                    }],
                    "pass_threshold": 1,
                    "total": 1
                },
                "2": {
                    "level": 2,
                    "level_name": "Intermediate",
                    "questions": [{
                        "id": 2,
                        "question": "First-line therapy?",
                        "options": ["A) Thiazide", "B) Beta blocker", "C) Nitrate", "D) Digoxin"],
                        "correct_answer": "A"
                    }],
                    "pass_threshold": 1,
                    "total": 1
                }
            }
        }
    })
}

async fn learn(Json(body): Json<Value>) -> Response {
    if body["query"] == "boom" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Failed to generate learning content: boom" })),
        )
            .into_response();
    }
    Json(lesson_body("sess-42")).into_response()
}

async fn evaluate(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    let level = body["level"].as_u64().unwrap_or_default();
    if let Ok(mut slot) = stub.last_evaluation.lock() {
        *slot = Some(body);
    }
    if level == 4 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "level"], "msg": "bad" }] })),
        )
            .into_response();
    }
    Json(json!({
        "level": level,
        "level_name": "Beginner",
        "passed": false,
        "score": 0,
        "total": 1,
        "pass_threshold": 1,
        "percentage": 0,
        "results": [{
            "question_id": 1,
            "question": "Which value defines stage 1 hypertension?",
            "user_answer": "C",
            "correct_answer": "B",
            "is_correct": false,
            "explanation": "ACC/AHA 2017 uses **130/80**.",
            "concept": "Thresholds"
        }],
        "mastery_achieved": false
    }))
    .into_response()
}

async fn session(Path(id): Path<String>) -> Response {
    if id == "sess-42" {
        return Json(lesson_body("sess-42")).into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Session not found" })),
    )
        .into_response()
}

async fn liveness() -> Json<Value> {
    Json(json!({ "message": "MedLearn AI API is running!", "status": "healthy" }))
}

async fn spawn_stub() -> (HttpBackend, Stub) {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/learn", post(learn))
        .route("/api/quiz/evaluate", post(evaluate))
        .route("/api/session/:id", get(session))
        .route("/api/test", get(liveness))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });

    let config = ApiConfig::parse(&format!("http://{addr}")).unwrap();
    (HttpBackend::new(config), stub)
}

#[tokio::test]
async fn learn_response_becomes_session() {
    let (backend, _) = spawn_stub().await;
    let session = backend.generate_learning("Hypertension").await.unwrap();

    assert_eq!(session.session_id().as_str(), "sess-42");
    assert_eq!(session.topic(), "Hypertension");
    assert_eq!(session.slides().len(), 2);
    assert!(session.slides()[0].has_audio());
    assert!(session.slides()[0].image_url.is_relative());
    assert!(!session.slides()[1].has_audio());

    let quiz = session.quiz();
    let beginner = quiz.level(Level::Beginner);
    assert_eq!(beginner.questions()[0].concept.as_deref(), Some("Thresholds"));
    let listed = &quiz.level(Level::Intermediate).questions()[0];
    assert_eq!(listed.options[&OptionKey::new("A").unwrap()], "Thiazide");
    assert!(!quiz.level(Level::Advanced).is_available());
    assert!(!quiz.level(Level::Expert).is_available());
}

#[tokio::test]
async fn error_detail_is_surfaced() {
    let (backend, _) = spawn_stub().await;
    assert_eq!(
        backend.generate_learning("boom").await,
        Err(ApiError::Generation(
            "Failed to generate learning content: boom".into()
        ))
    );
}

#[tokio::test]
async fn evaluation_posts_ordered_answers_and_decodes_result() {
    let (backend, stub) = spawn_stub().await;
    let mut answers = AnswerSet::new();
    answers.record(QuestionId::new(1), OptionKey::new("C").unwrap());

    let result = backend
        .evaluate_quiz(&SessionId::new("sess-42").unwrap(), Level::Beginner, &answers)
        .await
        .unwrap();
    assert!(!result.passed);
    assert_eq!(result.percentage(), 0);
    assert_eq!(result.per_question[0].correct_answer, "B");
    assert_eq!(result.incorrect_count(), 1);

    let sent = stub.last_evaluation.lock().unwrap().clone();
    assert_eq!(
        sent,
        Some(json!({ "session_id": "sess-42", "level": 1, "user_answers": { "1": "C" } }))
    );
}

#[tokio::test]
async fn structured_detail_falls_back_to_generic_message() {
    let (backend, _) = spawn_stub().await;
    let err = backend
        .evaluate_quiz(&SessionId::new("sess-42").unwrap(), Level::Expert, &AnswerSet::new())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Evaluation("Failed to evaluate quiz".into()));
}

#[tokio::test]
async fn session_lookup_maps_absence_to_not_found() {
    let (backend, _) = spawn_stub().await;
    let session = backend
        .get_session(&SessionId::new("sess-42").unwrap())
        .await
        .unwrap();
    assert_eq!(session.slides().len(), 2);

    assert_eq!(
        backend.get_session(&SessionId::new("gone").unwrap()).await,
        Err(ApiError::NotFound("Session not found".into()))
    );
}

#[tokio::test]
async fn ping_returns_opaque_payload() {
    let (backend, _) = spawn_stub().await;
    let payload = backend.ping().await.unwrap();
    assert_eq!(payload["status"], "healthy");
}

#[tokio::test]
async fn unreachable_backend_uses_generic_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(ApiConfig::parse(&format!("http://{addr}")).unwrap());
    assert_eq!(
        backend.generate_learning("Stroke").await,
        Err(ApiError::Generation(
            "Failed to generate learning content".into()
        ))
    );
    assert!(matches!(backend.ping().await, Err(ApiError::Unavailable(_))));
}
