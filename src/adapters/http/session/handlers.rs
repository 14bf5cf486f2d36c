//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::session::{
    GenerateProfileCommand, GenerateProfileHandler, GetSessionHandler, GetSessionQuery,
    NavigateCommand, NavigateHandler, Navigation, OpenSessionCommand, OpenSessionHandler,
    SubmitMessageCommand, SubmitMessageHandler,
};
use crate::application::{SessionRegistry, SessionStoreAdapter};
use crate::domain::conversation::ConversationMachine;
use crate::domain::foundation::{ErrorCode, UserId};

use super::dto::{
    ErrorResponse, NextRequest, SessionResponse, SubmitMessageRequest, TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    open_handler: Arc<OpenSessionHandler>,
    navigate_handler: Arc<NavigateHandler>,
    submit_handler: Arc<SubmitMessageHandler>,
    get_handler: Arc<GetSessionHandler>,
    profile_handler: Arc<GenerateProfileHandler>,
}

impl SessionHandlers {
    pub fn new(
        open_handler: Arc<OpenSessionHandler>,
        navigate_handler: Arc<NavigateHandler>,
        submit_handler: Arc<SubmitMessageHandler>,
        get_handler: Arc<GetSessionHandler>,
        profile_handler: Arc<GenerateProfileHandler>,
    ) -> Self {
        Self {
            open_handler,
            navigate_handler,
            submit_handler,
            get_handler,
            profile_handler,
        }
    }

    /// Builds every handler over one machine, store and registry.
    pub fn wire(
        machine: Arc<ConversationMachine>,
        store: Arc<SessionStoreAdapter>,
        registry: SessionRegistry,
    ) -> Self {
        Self::new(
            Arc::new(OpenSessionHandler::new(
                machine.clone(),
                store.clone(),
                registry.clone(),
            )),
            Arc::new(NavigateHandler::new(
                machine.clone(),
                store.clone(),
                registry.clone(),
            )),
            Arc::new(SubmitMessageHandler::new(
                machine.clone(),
                store.clone(),
                registry.clone(),
            )),
            Arc::new(GetSessionHandler::new(store.clone())),
            Arc::new(GenerateProfileHandler::new(machine, store, registry)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions/:user_id - Current session view
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let view = handlers.get_handler.handle(GetSessionQuery { user_id }).await;
    (StatusCode::OK, Json(SessionResponse::from(view))).into_response()
}

/// POST /api/sessions/:user_id/open - Page load
pub async fn open_session(
    State(handlers): State<SessionHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let turn = handlers
        .open_handler
        .handle(OpenSessionCommand { user_id })
        .await;
    (StatusCode::OK, Json(TurnResponse::from(turn))).into_response()
}

/// POST /api/sessions/:user_id/next - Onboarding Next button
pub async fn next_screen(
    State(handlers): State<SessionHandlers>,
    Path(user_id): Path<String>,
    body: Option<Json<NextRequest>>,
) -> Response {
    let user_id = match parse_user_id(user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let cmd = NavigateCommand {
        user_id,
        navigation: Navigation::Next { name: req.name },
    };
    match handlers.navigate_handler.handle(cmd).await {
        Ok(turn) => (StatusCode::OK, Json(TurnResponse::from(turn))).into_response(),
        Err(e) => rejected(e.code(), e),
    }
}

/// POST /api/sessions/:user_id/back - Onboarding Back button
pub async fn previous_screen(
    State(handlers): State<SessionHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = NavigateCommand {
        user_id,
        navigation: Navigation::Back,
    };
    match handlers.navigate_handler.handle(cmd).await {
        Ok(turn) => (StatusCode::OK, Json(TurnResponse::from(turn))).into_response(),
        Err(e) => rejected(e.code(), e),
    }
}

/// POST /api/sessions/:user_id/messages - Chat submission
pub async fn submit_message(
    State(handlers): State<SessionHandlers>,
    Path(user_id): Path<String>,
    Json(req): Json<SubmitMessageRequest>,
) -> Response {
    let user_id = match parse_user_id(user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitMessageCommand {
        user_id,
        text: req.text,
        reply_to: req.reply_to,
    };
    match handlers.submit_handler.handle(cmd).await {
        Ok(turn) => (StatusCode::OK, Json(TurnResponse::from(turn))).into_response(),
        Err(e) => rejected(e.code(), e),
    }
}

/// POST /api/sessions/:user_id/profile - Purpose profile
pub async fn generate_profile(
    State(handlers): State<SessionHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .profile_handler
        .handle(GenerateProfileCommand { user_id })
        .await
    {
        Ok(turn) => (StatusCode::OK, Json(TurnResponse::from(turn))).into_response(),
        Err(e) => rejected(e.code(), e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_user_id(raw: String) -> Result<UserId, Response> {
    UserId::new(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.code(), e.to_string())),
        )
            .into_response()
    })
}

/// Every refused user action is a 400 carrying the warning text.
fn rejected(code: ErrorCode, error: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(code, error.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::TurnError;

    #[test]
    fn rejected_action_maps_to_400() {
        let error = TurnError::NameRequired;
        let response = rejected(error.code(), error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_user_id_maps_to_400() {
        let response = parse_user_id("  ".to_string()).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn path_like_user_id_is_rejected() {
        assert!(parse_user_id("..".to_string()).is_err());
        assert!(parse_user_id("student-1".to_string()).is_ok());
    }
}
