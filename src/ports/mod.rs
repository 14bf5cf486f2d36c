//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LanguageModel` - text completions for mentor replies and scoring
//! - `DocumentStore` - per-user session documents with merge semantics
//! - `Clock` - time of day for greetings

mod clock;
mod document_store;
mod language_model;

pub use clock::{Clock, FixedHourClock, SystemClock};
pub use document_store::{merge_documents, DocumentStore, StoreError};
pub use language_model::{
    is_useful_response, LanguageModel, ModelCall, ModelError, MIN_USEFUL_RESPONSE_CHARS,
};
