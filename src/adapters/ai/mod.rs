//! Language Model Adapters.
//!
//! Implementations of the LanguageModel port.
//!
//! ## Available Adapters
//!
//! - `GeminiLanguageModel` - Google Gemini `generateContent` API
//! - `RetryingLanguageModel` - Wrapper with rate-limit backoff and empty-response retry
//! - `OfflineLanguageModel` - Always unavailable, used when no API key is configured
//! - `MockLanguageModel` - Scripted mock for testing

mod gemini_provider;
mod mock_provider;
mod offline_provider;
mod retrying_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiLanguageModel, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::MockLanguageModel;
pub use offline_provider::OfflineLanguageModel;
pub use retrying_provider::{RetryingLanguageModel, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS};
