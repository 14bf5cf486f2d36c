//! Language Model Port - Interface for the text generation collaborator.
//!
//! Every mentor reply that is not scripted comes from a single call:
//! a system instruction plus one user message in, plain text out.
//! Callers treat every error as recoverable and fall back to templates.
//!
//! # Example
//!
//! ```ignore
//! let call = ModelCall::new("You are a supportive mentor.", "Previous Answer: \"...\"")
//!     .with_max_output_tokens(100);
//! let text = model.complete(call).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Responses this short or shorter count as empty.
pub const MIN_USEFUL_RESPONSE_CHARS: usize = 5;

/// Port for single-shot text completions.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates text for one system instruction and user message.
    async fn complete(&self, call: ModelCall) -> Result<String, ModelError>;
}

/// One completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCall {
    pub system_instruction: String,
    pub user_message: String,
    pub max_output_tokens: Option<u32>,
}

impl ModelCall {
    pub fn new(system_instruction: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_message: user_message.into(),
            max_output_tokens: None,
        }
    }

    /// Caps the length of the generated text.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Errors from the language model collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// The provider answered with nothing usable.
    #[error("empty response")]
    EmptyResponse,

    /// Provider is unavailable or not configured.
    #[error("model unavailable: {message}")]
    Unavailable { message: String },

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request rejected by the provider.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl ModelError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// True for rate-limit failures, the only class retried with backoff.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ModelError::RateLimited { .. })
    }

    /// True for failures retried immediately.
    pub fn is_empty_response(&self) -> bool {
        matches!(self, ModelError::EmptyResponse)
    }

    /// Returns true if a later attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ModelError::RateLimited { .. }
                | ModelError::EmptyResponse
                | ModelError::Unavailable { .. }
                | ModelError::Network(_)
                | ModelError::Timeout { .. }
        )
    }
}

/// True when `text` is long enough to count as a real response.
pub fn is_useful_response(text: &str) -> bool {
    text.trim().chars().count() > MIN_USEFUL_RESPONSE_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_call_builder_works() {
        let call = ModelCall::new("system", "user").with_max_output_tokens(100);
        assert_eq!(call.system_instruction, "system");
        assert_eq!(call.user_message, "user");
        assert_eq!(call.max_output_tokens, Some(100));
    }

    #[test]
    fn only_rate_limits_are_rate_limited() {
        assert!(ModelError::rate_limited(1).is_rate_limited());
        assert!(!ModelError::network("down").is_rate_limited());
        assert!(!ModelError::EmptyResponse.is_rate_limited());
    }

    #[test]
    fn retryable_classification() {
        assert!(ModelError::unavailable("x").is_retryable());
        assert!(ModelError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(!ModelError::AuthenticationFailed.is_retryable());
        assert!(!ModelError::invalid_request("bad").is_retryable());
    }

    #[test]
    fn errors_display_details() {
        assert_eq!(
            ModelError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(ModelError::parse("no json").to_string(), "parse error: no json");
    }

    #[test]
    fn short_responses_are_not_useful() {
        assert!(!is_useful_response("  ok  "));
        assert!(!is_useful_response("12345"));
        assert!(is_useful_response("Great point!"));
    }
}
