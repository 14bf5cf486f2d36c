//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language model providers (Gemini, retrying wrapper, offline, mock)
//! - `storage` - Session document stores (in-memory, YAML files)
//! - `http` - axum routes exposing the application handlers

pub mod ai;
pub mod http;
pub mod storage;
