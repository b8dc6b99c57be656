//! Model-client boundary: request/response types, the `Provider` trait and
//! the typed failure signal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::Message;

/// A role-tagged message in chat-completion wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role().as_str().to_string(),
            content: message.text().to_string(),
        }
    }
}

/// One chat-completion call.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub model: &'a str,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
}

/// Why a model call produced no reply.
///
/// Providers return `anyhow::Error` values wrapping one of these so callers
/// can downcast and pick user-facing wording.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("{provider} request timed out")]
    Timeout { provider: String },

    #[error("{provider} network error: {message}")]
    Network { provider: String, message: String },

    #[error("{provider} rejected the credentials ({status}): {message}")]
    Auth {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} rate limit exceeded: {message}")]
    RateLimited { provider: String, message: String },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("No response from {provider}")]
    EmptyResponse { provider: String },
}

impl ProviderError {
    /// Authentication problems, including a missing key.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ProviderError::Auth { .. } | ProviderError::MissingApiKey { .. }
        )
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ProviderError::RateLimited { .. })
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send a full role-tagged conversation and return the assistant text.
    async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<String>;

    fn name(&self) -> &str;
}
