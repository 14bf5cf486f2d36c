//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{SessionTurn, SessionView};
use crate::domain::foundation::ErrorCode;
use crate::domain::session::{ConversationMode, Message, ReplyRef};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of the onboarding Next button.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// A chat submission. A missing `text` is treated as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reply_to: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Quote attached to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub message_id: String,
    pub sender: String,
    pub short_text: String,
}

impl From<ReplyRef> for ReplyResponse {
    fn from(reply: ReplyRef) -> Self {
        Self {
            message_id: reply.message_id,
            sender: reply.sender,
            short_text: reply.short_text,
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender: String,
    /// Text with `**bold**` markup.
    pub text: String,
    pub plain_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<ReplyResponse>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            text: message.raw_text,
            plain_text: message.plain_text,
            reply_to: message.reply_to.map(Into::into),
        }
    }
}

/// Session state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub step_index: i32,
    pub mode: ConversationMode,
    pub current_question: Option<String>,
    pub student_name: Option<String>,
    pub mentor_name: String,
    pub awaiting_validation_refine: bool,
    pub profile_generated: bool,
    pub messages: Vec<MessageResponse>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            step_index: view.step_index,
            mode: view.mode,
            current_question: view.current_question,
            student_name: view.student_name,
            mentor_name: view.mentor_name,
            awaiting_validation_refine: view.awaiting_validation_refine,
            profile_generated: view.profile_generated,
            messages: view.messages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Messages emitted by a command plus the session afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub emitted: Vec<MessageResponse>,
    pub session: SessionResponse,
}

impl From<SessionTurn> for TurnResponse {
    fn from(turn: SessionTurn) -> Self {
        Self {
            emitted: turn.emitted.into_iter().map(Into::into).collect(),
            session: turn.session.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
