//! Language model used when no API key is configured.
//!
//! Every call fails with `Unavailable`, so the conversation runs entirely
//! on its scripted fallbacks.

use async_trait::async_trait;

use crate::ports::{LanguageModel, ModelCall, ModelError};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLanguageModel;

#[async_trait]
impl LanguageModel for OfflineLanguageModel {
    async fn complete(&self, _call: ModelCall) -> Result<String, ModelError> {
        Err(ModelError::unavailable("no language model configured"))
    }
}
