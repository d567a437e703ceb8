//! Chat-completions wire types and the [`ChatApi`] trait seam.
//!
//! The remote contract is the OpenRouter (OpenAI-compatible) endpoint:
//! `{messages, model, temperature, max_tokens, top_p}` in,
//! `{choices: [{message: {content}}]}` out, with images embedded as
//! `data:image/png;base64,...` URLs inside a message's content array.
//!
//! [`ChatApi`] exists so the vision and translation clients can be
//! exercised against a scripted stub in tests; [`OpenRouterClient`] is the
//! one production implementation.

use crate::error::UnitError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

// ── Request types ────────────────────────────────────────────────────────

/// One chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    /// `f64`, not `f32`: JSON numbers are doubles, and an `f32` 0.7
    /// widens to 0.699999988079071 on the wire.
    pub temperature: f64,
    pub max_tokens: u32,
    /// Only description requests set a nucleus-sampling parameter;
    /// translation requests omit the field entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// One message in a chat-completions request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    /// A plain-text message with the given role.
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    /// A user message carrying an embedded image followed by a text prompt.
    ///
    /// The image part comes first: vision models read the attachment before
    /// the instruction, matching the remote contract's documented layout.
    pub fn user_with_image(data_url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: data_url.into(),
                    },
                },
                ContentPart::Text {
                    text: prompt.into(),
                },
            ]),
        }
    }
}

/// Message content: a bare string or a multimodal part list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

// ── Response types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ── Trait seam ───────────────────────────────────────────────────────────

/// A chat-completions backend.
///
/// The orchestrator holds this as `Arc<dyn ChatApi>` so tests can inject a
/// scripted implementation and assert on the exact request bodies built by
/// the vision and translation clients.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Whether an API credential is configured.
    ///
    /// The translation client checks this before building a request; when
    /// false it degrades to an empty result without any network call.
    fn is_configured(&self) -> bool;

    /// Issue one request and return the first choice's trimmed content.
    async fn chat(&self, request: &ChatRequest) -> Result<String, UnitError>;
}

// ── Production client ────────────────────────────────────────────────────

/// [`ChatApi`] implementation backed by the OpenRouter HTTP endpoint.
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl OpenRouterClient {
    /// Create a client for the given endpoint and optional credential.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UnitError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UnitError::RemoteCall {
                detail: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatApi for OpenRouterClient {
    fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, UnitError> {
        let mut req = self.http.post(&self.api_url).json(request);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| UnitError::RemoteCall {
            detail: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UnitError::RemoteCall {
                detail: format!("API error ({status}): {body}"),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| UnitError::RemoteCall {
            detail: format!("Failed to parse response: {e}"),
        })?;

        if let Some(error) = parsed.error {
            return Err(UnitError::RemoteCall {
                detail: format!("API error: {}", error.message),
            });
        }

        let content = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .map(|c| c.message.content)
            .ok_or_else(|| UnitError::RemoteCall {
                detail: "Response contained no choices".to_string(),
            })?;

        debug!("Chat completion returned {} chars", content.len());
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_vision_shape() {
        let req = ChatRequest {
            messages: vec![ChatMessage::user_with_image(
                "data:image/png;base64,AAAA",
                "describe this",
            )],
            model: "meta-llama/llama-3.2-11b-vision-instruct".to_string(),
            temperature: 0.7,
            max_tokens: 50,
            top_p: Some(0.90),
        };
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 50);
        assert_eq!(json["top_p"], 0.9);

        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image_url");
        assert_eq!(
            content[0]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "describe this");
    }

    #[test]
    fn request_omits_top_p_when_unset() {
        let req = ChatRequest {
            messages: vec![
                ChatMessage::text("system", "persona"),
                ChatMessage::text("user", "hello"),
            ],
            model: "mistralai/mixtral-8x7b-instruct".to_string(),
            temperature: 0.3,
            max_tokens: 1500,
            top_p: None,
        };
        let json = serde_json::to_value(&req).unwrap();

        assert!(json.get("top_p").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "persona");
    }

    #[test]
    fn response_parses_first_choice() {
        let raw = r#"{"choices":[{"message":{"content":"  a red bicycle  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.choices.unwrap().remove(0).message.content;
        assert_eq!(content.trim(), "a red bicycle");
    }

    #[test]
    fn client_without_key_is_unconfigured() {
        let client =
            OpenRouterClient::new("https://example.invalid/v1", None, Duration::from_secs(5))
                .unwrap();
        assert!(!client.is_configured());

        let client = OpenRouterClient::new(
            "https://example.invalid/v1",
            Some("sk-or-test".into()),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(client.is_configured());
    }
}
