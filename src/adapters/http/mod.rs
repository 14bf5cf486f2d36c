//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes; [`api_router`] mounts them
//! with tracing, CORS and a request timeout.

pub mod generate;
mod router;
pub mod session;

// Re-export key types for convenience
pub use generate::{generate_routes, GenerateHandlers};
pub use router::api_router;
pub use session::{session_routes, ErrorResponse, SessionHandlers};
