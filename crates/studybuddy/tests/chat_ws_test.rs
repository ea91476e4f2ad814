//! websocket tests for `/ws/chat` against a mocked completion provider.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use secrecy::SecretString;
use serde_json::{Value, json};
use studybuddy::{ChatClient, create_app};
use studybuddy_db::StudybuddyDb;
use studybuddy_types::{ChatConfig, Config};
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_server(chat: Option<ChatClient>) -> SocketAddr {
    let db = StudybuddyDb::new_in_memory()
        .await
        .expect("failed to create in-memory database");
    let app = create_app(db, Config::default(), chat);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });
    addr
}

async fn exchange(addr: SocketAddr, frames: &[&str]) -> Vec<Value> {
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/chat"))
        .await
        .expect("failed to connect");

    let mut replies = Vec::new();
    for frame in frames {
        ws.send(Message::text(frame.to_string())).await.expect("send failed");
        let reply = ws
            .next()
            .await
            .expect("connection closed")
            .expect("websocket error");
        let text = reply.to_text().expect("expected a text frame");
        replies.push(serde_json::from_str(text).expect("reply is not json"));
    }
    ws.close(None).await.ok();
    replies
}

#[tokio::test]
async fn test_chat_relays_reply() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Paging splits memory into frames." } }]
        })))
        .mount(&provider)
        .await;

    let config = ChatConfig {
        base_url: provider.uri(),
        ..ChatConfig::default()
    };
    let client = ChatClient::new(&config, SecretString::from("gsk-test")).expect("client");
    let addr = spawn_server(Some(client)).await;

    let replies = exchange(
        addr,
        &[r#"{"message": "what is paging?"}"#, r#"{"message": "  "}"#],
    )
    .await;

    assert_eq!(replies[0]["reply"], "Paging splits memory into frames.");
    assert_eq!(replies[1]["error"], "message is required");
}

#[tokio::test]
async fn test_provider_failure_keeps_connection_open() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&provider)
        .await;

    let config = ChatConfig {
        base_url: provider.uri(),
        ..ChatConfig::default()
    };
    let client = ChatClient::new(&config, SecretString::from("gsk-test")).expect("client");
    let addr = spawn_server(Some(client)).await;

    let replies = exchange(addr, &[r#"{"message": "hi"}"#, "not json"]).await;

    assert_eq!(replies[0]["error"], "the assistant is unavailable right now");
    let relayed = replies[0].to_string();
    assert!(!relayed.contains("upstream down"));
    assert!(!relayed.contains("500"));
    assert!(replies[1]["error"].is_string());
}

#[tokio::test]
async fn test_chat_disabled() {
    let addr = spawn_server(None).await;
    let replies = exchange(addr, &[r#"{"message": "hello"}"#]).await;
    assert_eq!(replies[0]["error"], "chat is not available");
}
