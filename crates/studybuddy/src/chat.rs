//! study assistant chat relay.
//!
//! forwards one user message at a time to an openai-compatible chat
//! completion endpoint and returns the assistant's reply. nothing is stored.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use studybuddy_types::ChatConfig;
use tracing::{debug, warn};

/// errors from the chat relay.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// http request failed
    #[error("http error: {0}")]
    Http(reqwest::Error),
    /// the provider did not answer in time
    #[error("the assistant took too long to answer")]
    Timeout,
    /// provider returned an error response; the body is only logged
    #[error("provider returned {0}")]
    Provider(reqwest::StatusCode),
    /// provider answered without any text
    #[error("the assistant returned an empty reply")]
    EmptyReply,
    /// chat is switched off or has no api key
    #[error("chat is not available")]
    Disabled,
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else {
            ChatError::Http(err)
        }
    }
}

impl ChatError {
    /// text safe to send to a chat client.
    ///
    /// transport and provider failures collapse into one message; their
    /// details stay in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            ChatError::Http(_) | ChatError::Provider(_) => "the assistant is unavailable right now",
            ChatError::Timeout => "the assistant took too long to answer",
            ChatError::EmptyReply => "the assistant returned an empty reply",
            ChatError::Disabled => "chat is not available",
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// client for an openai-compatible chat completion api.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: String,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// build a client from configuration and an already-loaded api key.
    pub fn new(config: &ChatConfig, api_key: SecretString) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ChatError::Http)?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            system_prompt: config.system_prompt.clone(),
        })
    }

    /// ask the assistant one question.
    pub async fn reply(&self, message: &str) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, body = %body, "chat provider returned an error");
            return Err(ChatError::Provider(status));
        }

        let body: CompletionResponse = resp.json().await?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ChatError::EmptyReply)?;

        debug!(chars = reply.len(), "chat reply received");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    fn test_client(base_url: &str) -> ChatClient {
        let config = ChatConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
            ..ChatConfig::default()
        };
        ChatClient::new(&config, SecretString::from("gsk-test")).unwrap()
    }

    #[tokio::test]
    async fn reply_sends_prompt_and_returns_content() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/chat/completions"))
            .and(matchers::header("Authorization", "Bearer gsk-test"))
            .and(matchers::body_partial_json(serde_json::json!({
                "model": "openai/gpt-oss-120b",
                "max_tokens": 300,
                "messages": [
                    { "role": "system", "content": "You are a helpful study assistant." },
                    { "role": "user", "content": "what is a monad?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": " a burrito \n" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let reply = test_client(&mock_server.uri())
            .reply("what is a monad?")
            .await
            .unwrap();
        assert_eq!(reply, "a burrito");
    }

    #[tokio::test]
    async fn reply_reports_provider_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server.uri()).reply("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Provider(status) if status.as_u16() == 429));
        assert!(!err.to_string().contains("rate limited"));
        assert_eq!(err.client_message(), "the assistant is unavailable right now");
    }

    #[test]
    fn client_message_hides_transport_details() {
        let err = ChatError::Provider(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.client_message(), "the assistant is unavailable right now");
        assert_eq!(
            ChatError::Timeout.client_message(),
            "the assistant took too long to answer"
        );
        assert_eq!(ChatError::Disabled.client_message(), "chat is not available");
    }

    #[tokio::test]
    async fn reply_rejects_empty_choices() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server.uri()).reply("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyReply));
    }

    #[tokio::test]
    async fn reply_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server.uri()).reply("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Timeout));
    }
}
