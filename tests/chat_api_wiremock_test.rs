//! Chat API calls over real HTTP using wiremock.
//!
//! These tests run the reqwest-backed `ChatClient` against a local mock
//! server for all three endpoints.

use resume_chat::adapters::mock::RecordingView;
use resume_chat::client::ChatClient;
use resume_chat::error::ChatError;
use resume_chat::health_check::{check_health, LinkStatus};
use resume_chat::session::{Session, SessionState, NO_REPLY_NOTICE};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body.to_string())
}

#[tokio::test]
async fn test_streamed_answer_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"question": "Who are you?"})))
        .respond_with(sse(
            "data: {\"content\": \"I am \"}\n\ndata: {\"content\": \"an assistant.\"}\n\ndata: [DONE]\n\n",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = Session::new(ChatClient::new(mock_server.uri()));
    let view = RecordingView::new();

    let report = session.ask("Who are you?", &view).await.unwrap();

    assert_eq!(report.outcome, SessionState::Completed);
    assert_eq!(report.answer, "I am an assistant.");
    assert_eq!(view.bubble_text(0).as_deref(), Some("I am an assistant."));
    assert!(view.send_enabled());
}

#[tokio::test]
async fn test_server_500_is_rendered_as_connection_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let mut session = Session::new(ChatClient::new(mock_server.uri()));
    let view = RecordingView::new();

    let report = session.ask("q", &view).await.unwrap();

    assert_eq!(report.outcome, SessionState::Failed);
    assert_eq!(
        view.bubble_text(0).as_deref(),
        Some("Connection failed: Request failed: 500")
    );
    assert!(view.send_enabled());
}

#[tokio::test]
async fn test_empty_stream_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(sse("data: [DONE]\n\n"))
        .mount(&mock_server)
        .await;

    let mut session = Session::new(ChatClient::new(mock_server.uri()));
    let view = RecordingView::new();

    let report = session.ask("q", &view).await.unwrap();
    assert_eq!(report.outcome, SessionState::Empty);
    assert_eq!(view.bubble_text(0).as_deref(), Some(NO_REPLY_NOTICE));
}

#[tokio::test]
async fn test_server_error_event_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(sse("data: {\"error\": \"model overloaded\"}\n\n"))
        .mount(&mock_server)
        .await;

    let mut session = Session::new(ChatClient::new(mock_server.uri()));
    let view = RecordingView::new();

    let report = session.ask("q", &view).await.unwrap();
    assert_eq!(report.outcome, SessionState::Failed);
    assert_eq!(
        view.bubble_text(0).as_deref(),
        Some("Call failed: model overloaded")
    );
}

#[tokio::test]
async fn test_unreachable_server_fails_exchange() {
    // Nothing listens on port 9 (discard) in the test environment
    let mut session = Session::new(ChatClient::new("http://127.0.0.1:9"));
    let view = RecordingView::new();

    let report = session.ask("q", &view).await.unwrap();

    assert_eq!(report.outcome, SessionState::Failed);
    assert!(view
        .bubble_text(0)
        .unwrap()
        .starts_with("Connection failed:"));
    assert!(view.send_enabled());
}

#[tokio::test]
async fn test_chat_sync_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat_sync"))
        .and(body_json(serde_json::json!({"question": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "Hello!",
            "model": "test-model"
        })))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let answer = client.ask_sync("hi").await.unwrap();

    assert_eq!(answer.content, "Hello!");
    assert_eq!(answer.model.as_deref(), Some("test-model"));
}

#[tokio::test]
async fn test_chat_sync_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat_sync"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"error": "upstream unavailable"})),
        )
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    match client.ask_sync("hi").await {
        Err(ChatError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_online_with_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "model": "test-model",
            "provider": "test"
        })))
        .mount(&mock_server)
        .await;

    let report = check_health(&ChatClient::new(mock_server.uri())).await;

    assert_eq!(report.status, LinkStatus::Online);
    assert_eq!(report.model.as_deref(), Some("test-model"));
}

#[tokio::test]
async fn test_health_with_api_note_is_still_online() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "api_note": "probe failed"
        })))
        .mount(&mock_server)
        .await;

    let report = check_health(&ChatClient::new(mock_server.uri())).await;

    assert_eq!(report.status, LinkStatus::Online);
    assert_eq!(report.note.as_deref(), Some("probe failed"));
}

#[tokio::test]
async fn test_health_unreachable_is_offline() {
    let report = check_health(&ChatClient::new("http://127.0.0.1:9")).await;
    assert_eq!(report.status, LinkStatus::Offline);
}
