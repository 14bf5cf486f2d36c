//! HTTP handlers for the model proxy.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::session::ErrorResponse;
use crate::application::{GenerateTextError, GenerateTextHandler};

use super::dto::GenerateRequest;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct GenerateHandlers {
    generate_handler: Arc<GenerateTextHandler>,
}

impl GenerateHandlers {
    pub fn new(generate_handler: Arc<GenerateTextHandler>) -> Self {
        Self { generate_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/generate - Plain-text completion for a raw prompt
pub async fn generate_text(
    State(handlers): State<GenerateHandlers>,
    body: Option<Json<GenerateRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    match handlers.generate_handler.handle(req.into()).await {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(e) => handle_generate_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_generate_error(error: GenerateTextError) -> Response {
    match &error {
        GenerateTextError::MissingQuery => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(error.code(), error.to_string())),
        )
            .into_response(),
        GenerateTextError::Model(cause) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse::new(error.code(), error.to_string())
                    .with_details(json!({ "cause": cause.to_string() })),
            ),
        )
            .into_response(),
    }
}
