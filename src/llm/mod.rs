//! LLM provider boundary.
//!
//! The pipeline treats the model as an opaque text-in/text-out service behind
//! the [`LlmProvider`] trait. The shipped implementation talks to an
//! OpenAI-compatible chat-completions endpoint over HTTP; tests substitute
//! mock providers.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Role + content pair for a chat-style completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// A completion request with optional sampling knobs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A completion response. Only the text matters to this pipeline.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
}

/// Backend-agnostic LLM interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Run a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

// ── OpenAI-compatible HTTP provider ─────────────────────────────────

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Provider for OpenAI-compatible chat-completions endpoints.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            url: OPENAI_CHAT_URL.to_string(),
        }
    }

    /// Point at a different OpenAI-compatible endpoint (e.g. a local server).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: "openai".to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LlmError::AuthFailed {
                provider: "openai".to_string(),
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("status {status}: {detail}"),
            });
        }

        let reply: ChatCompletionReply =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: "openai".to_string(),
                reason: e.to_string(),
            })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "openai".to_string(),
                reason: "empty choices array".to_string(),
            })?;

        tracing::debug!(model = %self.model, chars = content.len(), "LLM completion received");

        Ok(CompletionResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_sets_knobs() {
        let req = CompletionRequest::new(vec![ChatMessage::user("hi")])
            .with_temperature(0.1)
            .with_max_tokens(256);
        assert_eq!(req.temperature, Some(0.1));
        assert_eq!(req.max_tokens, Some(256));
        assert_eq!(req.messages[0].role, "user");
    }

    #[test]
    fn provider_construction_does_not_validate_key() {
        // Auth failures surface on the first request, not at construction.
        let provider = OpenAiProvider::new(SecretString::from("test-key"), "gpt-4o-mini");
        assert_eq!(provider.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn completion_body_omits_unset_knobs() {
        let messages = vec![ChatMessage::system("s")];
        let body = ChatCompletionBody {
            model: "m",
            messages: &messages,
            temperature: None,
            max_tokens: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }
}
