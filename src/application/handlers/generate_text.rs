//! GenerateTextHandler - Passes one prompt straight to the language model.
//!
//! Backs the `/api/generate` proxy so browsers never see the API key.

use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::domain::foundation::ErrorCode;
use crate::ports::{LanguageModel, ModelCall, ModelError};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";
pub const NO_RESPONSE_TEXT: &str = "No response received.";

/// Command to generate text for a raw prompt.
#[derive(Debug, Clone, Default)]
pub struct GenerateTextCommand {
    pub system_instruction: Option<String>,
    pub user_query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateTextError {
    #[error("Missing userQuery")]
    MissingQuery,

    #[error("Error processing your request")]
    Model(#[from] ModelError),
}

impl GenerateTextError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateTextError::MissingQuery => ErrorCode::EmptyField,
            GenerateTextError::Model(_) => ErrorCode::ModelUnavailable,
        }
    }
}

/// Handler for the model proxy.
pub struct GenerateTextHandler {
    model: Arc<dyn LanguageModel>,
}

impl GenerateTextHandler {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn handle(&self, cmd: GenerateTextCommand) -> Result<String, GenerateTextError> {
        let query = cmd
            .user_query
            .filter(|q| !q.trim().is_empty())
            .ok_or(GenerateTextError::MissingQuery)?;
        let system = cmd
            .system_instruction
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.to_string());

        match self.model.complete(ModelCall::new(system, query)).await {
            Ok(text) => Ok(text),
            Err(ModelError::EmptyResponse) => Ok(NO_RESPONSE_TEXT.to_string()),
            Err(err) => {
                warn!(error = %err, "Proxied generation failed");
                Err(err.into())
            }
        }
    }
}
