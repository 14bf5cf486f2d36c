//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_profile, get_session, next_screen, open_session, previous_screen, submit_message,
    SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/:user_id", get(get_session))
        .route("/:user_id/open", post(open_session))
        .route("/:user_id/next", post(next_screen))
        .route("/:user_id/back", post(previous_screen))
        .route("/:user_id/messages", post(submit_message))
        .route("/:user_id/profile", post(generate_profile))
        .with_state(handlers)
}
