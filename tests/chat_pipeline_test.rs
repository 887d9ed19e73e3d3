//! Chat pipeline integration tests
//!
//! Drives `ChatSession` end to end against a mock suggestion endpoint.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskmate::api::ApiClient;
use taskmate::chat::render::{render_message, RenderedBlock};
use taskmate::chat::{ChatSession, ReplyPacing, SubmissionState};
use taskmate::config::ApiConfig;
use taskmate::credentials::MemoryTokenStore;

fn make_session(server: &MockServer) -> ChatSession {
    let config = ApiConfig {
        base_url: format!("{}/api/v1", server.uri()),
        timeout_seconds: 5,
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, Arc::new(MemoryTokenStore::with_token("tok")))
        .expect("client should build");
    ChatSession::new(Arc::new(client), ReplyPacing::none())
}

#[tokio::test]
async fn test_september_question_becomes_schedule_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/suggestions"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "question": "How should I arrange my tasks in September 2025?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schedule": [
                {
                    "taskId": 1,
                    "title": "Write report",
                    "suggestedStart": "2025-09-05T09:00",
                    "durationMinutes": 60,
                    "summary": "Draft Q3 report"
                },
                {
                    "taskId": 2,
                    "title": "Review PRs",
                    "suggestedStart": "2025-09-06T14:00",
                    "durationMinutes": 30,
                    "summary": "Clear the queue"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = make_session(&server);
    let (reply, state) = session
        .submit("How should I arrange my tasks in September 2025?")
        .await
        .unwrap();

    assert_eq!(state, SubmissionState::Succeeded);
    assert_eq!(
        reply.content(),
        "• [1] Write report — start: 2025-09-05T09:00, duration: 60 min. Summary: Draft Q3 report\n\
         • [2] Review PRs — start: 2025-09-06T14:00, duration: 30 min. Summary: Clear the queue"
    );

    let blocks = render_message(reply);
    assert_eq!(blocks.len(), 2);
    assert!(matches!(&blocks[1], RenderedBlock::Card(c) if c.task_id == "2" && c.duration_minutes == "30"));
}

#[tokio::test]
async fn test_lowercase_month_is_sent_as_typed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/suggestions"))
        .and(body_json(json!({
            "question": "How should I arrange my tasks in october 2025?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "schedule": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = make_session(&server);
    let (reply, state) = session.submit("what about october 2025").await.unwrap();
    assert_eq!(state, SubmissionState::EmptyResult);
    assert_eq!(
        reply.content(),
        "I couldn't fetch task suggestions at the moment. Please try again later."
    );
}

#[tokio::test]
async fn test_server_error_gives_generic_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/suggestions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace here"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = make_session(&server);
    let (reply, state) = session.submit("Plan December 2025 please").await.unwrap();
    assert_eq!(state, SubmissionState::Failed);
    assert_eq!(
        reply.content(),
        "There was an error fetching task suggestions. Please try again later."
    );
}

#[tokio::test]
async fn test_malformed_body_gives_generic_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut session = make_session(&server);
    let (_, state) = session.submit("January 2026").await.unwrap();
    assert_eq!(state, SubmissionState::Failed);
}

#[tokio::test]
async fn test_question_without_month_makes_no_request() {
    let server = MockServer::start().await;
    let mut session = make_session(&server);

    let (reply, state) = session.submit("What should I do next week?").await.unwrap();
    assert_eq!(state, SubmissionState::Rejected);
    assert!(reply
        .content()
        .starts_with("Please include a specific month and year"));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(session.transcript().len(), 3);
}
