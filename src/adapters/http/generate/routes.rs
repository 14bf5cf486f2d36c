//! HTTP routes for the model proxy.

use axum::{routing::post, Router};

use super::handlers::{generate_text, GenerateHandlers};

pub fn generate_routes(handlers: GenerateHandlers) -> Router {
    Router::new()
        .route("/", post(generate_text))
        .with_state(handlers)
}
