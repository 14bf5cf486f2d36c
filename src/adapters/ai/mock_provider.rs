//! Mock language model for testing.
//!
//! Provides a scripted implementation of the LanguageModel port, allowing
//! tests to run without calling a real model.
//!
//! # Features
//!
//! - Queued responses and errors, consumed in order
//! - Unscripted calls fail with `Unavailable` unless a default is set
//! - Simulated delays for concurrency testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let model = MockLanguageModel::new()
//!     .with_response("{\"readiness_score\": 0.9}")
//!     .with_unavailable("down");
//!
//! let text = model.complete(call).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{LanguageModel, ModelCall, ModelError};

/// Scripted language model.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel {
    /// Scripted outcomes, consumed in order.
    responses: Arc<Mutex<VecDeque<Result<String, ModelError>>>>,
    /// Returned once the script runs out. `None` means fail.
    default_response: Option<String>,
    /// Simulated latency per call.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<ModelCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLanguageModel {
    /// Creates a mock with an empty script. Every call fails until
    /// responses are queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(text.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ModelError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Queues an `Unavailable` error.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.with_error(ModelError::unavailable(message))
    }

    /// Response returned once the script is exhausted.
    pub fn with_default_response(mut self, text: impl Into<String>) -> Self {
        self.default_response = Some(text.into());
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<ModelCall> {
        lock(&self.calls).clone()
    }

    /// Number of scripted outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }

    fn next_response(&self) -> Result<String, ModelError> {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            self.default_response
                .clone()
                .ok_or_else(|| ModelError::unavailable("no scripted response"))
        })
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, call: ModelCall) -> Result<String, ModelError> {
        lock(&self.calls).push(call);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call() -> ModelCall {
        ModelCall::new("system", "hello")
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let model = MockLanguageModel::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(model.complete(call()).await.unwrap(), "First");
        assert_eq!(model.complete(call()).await.unwrap(), "Second");
    }

    #[tokio::test]
    async fn fails_when_script_is_exhausted() {
        let model = MockLanguageModel::new().with_response("Only one");

        model.complete(call()).await.unwrap();
        let err = model.complete(call()).await.unwrap_err();

        assert!(matches!(err, ModelError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn default_response_follows_script() {
        let model = MockLanguageModel::new()
            .with_response("scripted")
            .with_default_response("default");

        assert_eq!(model.complete(call()).await.unwrap(), "scripted");
        assert_eq!(model.complete(call()).await.unwrap(), "default");
        assert_eq!(model.complete(call()).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let model = MockLanguageModel::new().with_error(ModelError::rate_limited(30));

        let err = model.complete(call()).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(model.remaining(), 0);
    }

    #[tokio::test]
    async fn tracks_calls() {
        let model = MockLanguageModel::new().with_response("a");
        assert_eq!(model.call_count(), 0);

        model
            .complete(ModelCall::new("sys", "user").with_max_output_tokens(100))
            .await
            .unwrap();

        assert_eq!(model.call_count(), 1);
        let calls = model.calls();
        assert_eq!(calls[0].system_instruction, "sys");
        assert_eq!(calls[0].max_output_tokens, Some(100));
    }

    #[tokio::test]
    async fn clones_share_script_and_history() {
        let model = MockLanguageModel::new().with_response("shared");
        let clone = model.clone();

        assert_eq!(clone.complete(call()).await.unwrap(), "shared");
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.remaining(), 0);
    }
}
