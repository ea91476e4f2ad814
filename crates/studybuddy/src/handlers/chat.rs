//! websocket endpoint for the study assistant.
//!
//! each text frame carries `{"message": "..."}` and is answered with
//! `{"reply": "..."}` or `{"error": "..."}`. a failed reply leaves the
//! connection open.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::AppState;
use crate::chat::{ChatClient, ChatError};

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ChatResponse {
    Reply(String),
    Error(String),
}

/// `GET /ws/chat`
pub async fn chat_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.chat))
}

async fn handle_socket(mut socket: WebSocket, chat: Option<ChatClient>) {
    debug!("chat connection opened");

    while let Some(frame) = socket.recv().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!("chat connection error: {e}");
                break;
            }
        };

        let response = answer(chat.as_ref(), text.as_str()).await;
        let payload = match serde_json::to_string(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to encode chat response: {e}");
                break;
            }
        };
        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }

    debug!("chat connection closed");
}

async fn answer(chat: Option<&ChatClient>, frame: &str) -> ChatResponse {
    let request: ChatRequest = match serde_json::from_str(frame) {
        Ok(request) => request,
        Err(_) => return ChatResponse::Error("expected {\"message\": \"...\"}".to_string()),
    };

    let message = request.message.trim();
    if message.is_empty() {
        return ChatResponse::Error("message is required".to_string());
    }

    let Some(chat) = chat else {
        return ChatResponse::Error(ChatError::Disabled.client_message().to_string());
    };

    match chat.reply(message).await {
        Ok(reply) => ChatResponse::Reply(reply),
        Err(e) => {
            warn!("chat relay failed: {e}");
            ChatResponse::Error(e.client_message().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_format() {
        let reply = serde_json::to_value(ChatResponse::Reply("hi".into())).unwrap();
        assert_eq!(reply, serde_json::json!({ "reply": "hi" }));
        let error = serde_json::to_value(ChatResponse::Error("no".into())).unwrap();
        assert_eq!(error, serde_json::json!({ "error": "no" }));
    }

    #[tokio::test]
    async fn test_answer_without_client() {
        let response = answer(None, r#"{"message": "hello"}"#).await;
        assert!(matches!(response, ChatResponse::Error(msg) if msg == "chat is not available"));

        let response = answer(None, "not json").await;
        assert!(matches!(response, ChatResponse::Error(_)));

        let response = answer(None, r#"{"message": "  "}"#).await;
        assert!(matches!(response, ChatResponse::Error(msg) if msg == "message is required"));
    }
}
