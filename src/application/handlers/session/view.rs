//! Read models returned by the session handlers.

use serde::Serialize;

use crate::domain::conversation::TurnOutcome;
use crate::domain::session::{ConversationMode, Message, SessionState};

/// What the chat window needs to render a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub step_index: i32,
    pub mode: ConversationMode,
    pub current_question: Option<String>,
    pub student_name: Option<String>,
    pub mentor_name: String,
    pub awaiting_validation_refine: bool,
    pub profile_generated: bool,
    pub messages: Vec<Message>,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        Self {
            step_index: state.step.index(),
            mode: state.step.mode(),
            current_question: state.current_question_text.clone(),
            student_name: state.student_name.clone(),
            mentor_name: state.mentor_name.clone(),
            awaiting_validation_refine: state.awaiting_validation_refine,
            profile_generated: state.profile_generated,
            messages: state.message_log.messages().to_vec(),
        }
    }
}

/// Messages emitted by one command plus the session afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTurn {
    pub emitted: Vec<Message>,
    pub session: SessionView,
}

impl SessionTurn {
    pub fn new(outcome: TurnOutcome, state: &SessionState) -> Self {
        Self {
            emitted: outcome.messages,
            session: SessionView::from(state),
        }
    }

    /// Raw text of the emitted messages.
    pub fn emitted_texts(&self) -> Vec<&str> {
        self.emitted.iter().map(|m| m.raw_text.as_str()).collect()
    }
}
