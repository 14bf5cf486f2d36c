//! Storage Adapters
//!
//! Implementations of the DocumentStore port for persisting sessions.
//!
//! ## Available Adapters
//!
//! - **FileDocumentStore** - Stores each session as a YAML file on disk
//! - **InMemoryDocumentStore** - Stores sessions in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileDocumentStore, InMemoryDocumentStore};
//!
//! // Production: file-based storage
//! let store = FileDocumentStore::new("./data/sessions");
//!
//! // Testing: in-memory storage
//! let store = InMemoryDocumentStore::new();
//! ```

mod file_document_store;
mod in_memory_document_store;

pub use file_document_store::FileDocumentStore;
pub use in_memory_document_store::InMemoryDocumentStore;
