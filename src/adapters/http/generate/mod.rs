//! HTTP adapter for the model proxy.

mod dto;
mod handlers;
mod routes;

pub use dto::GenerateRequest;
pub use handlers::GenerateHandlers;
pub use routes::generate_routes;
