//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, MessageResponse, NextRequest, ReplyResponse, SessionResponse,
    SubmitMessageRequest, TurnResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
