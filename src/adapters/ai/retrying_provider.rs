//! Retrying wrapper for any language model.
//!
//! Rate-limit failures are retried with exponential backoff. Empty or
//! near-empty responses are retried immediately. Every other error is
//! returned at once so the caller can take its fallback.
//!
//! # Example
//!
//! ```ignore
//! let model = RetryingLanguageModel::new(Arc::new(GeminiLanguageModel::new(config)))
//!     .with_max_attempts(3)
//!     .with_initial_backoff(Duration::from_secs(1));
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{is_useful_response, LanguageModel, ModelCall, ModelError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

pub struct RetryingLanguageModel {
    inner: Arc<dyn LanguageModel>,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl RetryingLanguageModel {
    pub fn new(inner: Arc<dyn LanguageModel>) -> Self {
        Self {
            inner,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }

    /// Total attempts, including the first. At least one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Wait before the first rate-limit retry. Doubles on each retry.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }
}

#[async_trait]
impl LanguageModel for RetryingLanguageModel {
    async fn complete(&self, call: ModelCall) -> Result<String, ModelError> {
        let mut backoff = self.initial_backoff;
        let mut last_error = ModelError::EmptyResponse;

        for attempt in 1..=self.max_attempts {
            match self.inner.complete(call.clone()).await {
                Ok(text) if is_useful_response(&text) => return Ok(text),
                Ok(_) => {
                    debug!(attempt, "Empty model response, retrying");
                    last_error = ModelError::EmptyResponse;
                }
                Err(err) if err.is_empty_response() => {
                    debug!(attempt, "Empty model response, retrying");
                    last_error = err;
                }
                Err(err) if err.is_rate_limited() => {
                    warn!(attempt, backoff_ms = backoff.as_millis() as u64, "Model rate limited");
                    last_error = err;
                    if attempt < self.max_attempts {
                        sleep(backoff).await;
                        backoff *= 2;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }
}
