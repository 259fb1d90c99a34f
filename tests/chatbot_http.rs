//! Chat session against a fake chatbot service
//!
//! - the first message goes out without a session id and the returned id is persisted
//! - a stored id is attached to later messages and used to restore history
//! - clear keeps the session, reset forgets it

use property_browser::chatbot::{ChatSession, SessionState, FALLBACK_REPLY, SESSION_KEY};
use property_browser::models::ChatMessage;
use property_browser::store::{FileStore, KeyValueStore, MemoryStore};
use property_browser::{Config, HttpClient};
use serde_json::json;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<HttpClient> {
    let config = Config {
        api_base_url: Url::parse(&server.uri()).unwrap(),
        ..Config::default()
    };
    Arc::new(HttpClient::new(&config).unwrap())
}

fn request_bodies(requests: &[wiremock::Request]) -> Vec<serde_json::Value> {
    requests
        .iter()
        .filter(|r| r.url.path() == "/api/chatbot/message")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

async fn mount_reply(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/chatbot/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sessionId": "sess-123",
            "message": "Hello! How can I help you find a property?"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_first_message_has_no_session_and_persists_the_reply_id() {
    let server = MockServer::start().await;
    mount_reply(&server).await;

    let store = Arc::new(MemoryStore::new());
    let mut chat = ChatSession::mount(client_for(&server), store.clone()).await;
    chat.send_message("Hello").await;

    let bodies = request_bodies(&server.received_requests().await.unwrap());
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["message"], "Hello");
    assert!(bodies[0].get("sessionId").is_none());
    assert_eq!(store.get(SESSION_KEY).as_deref(), Some("sess-123"));

    chat.send_message("Any villas?").await;
    let bodies = request_bodies(&server.received_requests().await.unwrap());
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1]["sessionId"], "sess-123");
    assert_eq!(chat.transcript().len(), 4);
}

#[tokio::test]
async fn test_reply_without_session_id_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "hi" })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut chat = ChatSession::mount(client_for(&server), store.clone()).await;
    chat.send_message("Hello").await;

    assert_eq!(chat.transcript()[1], ChatMessage::bot(FALLBACK_REPLY));
    assert_eq!(chat.state(), &SessionState::NoSession);
    assert_eq!(store.get(SESSION_KEY), None);
}

#[tokio::test]
async fn test_stored_session_restores_history_on_mount() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chatbot/history/sess-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "history": [
                { "user": "Hi", "bot": "Welcome!", "timestamp": "2024-05-01T12:00:00Z" },
                { "user": "Prices?", "bot": "From $90,000.", "timestamp": "2024-05-01T12:01:00Z" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("state.json")).unwrap());
    store.set(SESSION_KEY, "sess-9").unwrap();

    let chat = ChatSession::mount(client_for(&server), store).await;
    assert_eq!(chat.session_id(), Some("sess-9"));
    assert_eq!(
        chat.transcript(),
        &[
            ChatMessage::user("Hi"),
            ChatMessage::bot("Welcome!"),
            ChatMessage::user("Prices?"),
            ChatMessage::bot("From $90,000."),
        ]
    );
}

#[tokio::test]
async fn test_history_with_epoch_timestamps_still_restores() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chatbot/history/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "history": [{ "user": "Hi", "bot": "Welcome!", "timestamp": 1714564800000u64 }]
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.set(SESSION_KEY, "s1").unwrap();

    let chat = ChatSession::mount(client_for(&server), store).await;
    assert_eq!(
        chat.transcript(),
        &[ChatMessage::user("Hi"), ChatMessage::bot("Welcome!")]
    );
}

#[tokio::test]
async fn test_refused_clear_keeps_the_transcript() {
    let server = MockServer::start().await;
    mount_reply(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/chatbot/history/sess-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut chat = ChatSession::mount(client_for(&server), store).await;
    chat.send_message("Hello").await;

    assert!(!chat.clear_chat().await);
    assert_eq!(chat.transcript().len(), 2);
    assert_eq!(chat.session_id(), Some("sess-123"));
}

#[tokio::test]
async fn test_clear_keeps_session_and_reset_forgets_it() {
    let server = MockServer::start().await;
    mount_reply(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/chatbot/history/sess-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut chat = ChatSession::mount(client_for(&server), store.clone()).await;
    chat.send_message("Hello").await;

    assert!(chat.clear_chat().await);
    assert!(chat.transcript().is_empty());
    assert_eq!(store.get(SESSION_KEY).as_deref(), Some("sess-123"));

    chat.reset_chat().await;
    assert_eq!(chat.state(), &SessionState::NoSession);
    assert_eq!(store.get(SESSION_KEY), None);
}
