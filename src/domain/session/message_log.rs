//! Append-only record of displayed chat messages.
//!
//! The log is the render source for the chat window. Message ids are
//! `msg-N`, where `N` is the log length at append time, so ids are unique
//! and increase with insertion order. A message may quote an earlier
//! message; the quoted id must already be in the log.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::text::{strip_markup, summarize_short};

/// Errors raised by [`MessageLog::append`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageLogError {
    #[error("reply target not found: {0}")]
    ReplyTargetNotFound(String),
}

/// Quote of an earlier message attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRef {
    pub message_id: String,
    pub sender: String,
    pub short_text: String,
}

/// One displayed chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    /// Text as written, may contain `**bold**` markup.
    pub raw_text: String,
    /// Markup-free text, used for quoting.
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<ReplyRef>,
}

impl Message {
    /// Builds a quote of this message using its short summary.
    pub fn quote(&self) -> ReplyRef {
        ReplyRef {
            message_id: self.id.clone(),
            sender: self.sender.clone(),
            short_text: summarize_short(&self.plain_text),
        }
    }
}

/// Ordered, append-only message log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its id.
    ///
    /// # Errors
    ///
    /// `ReplyTargetNotFound` if `reply_to` names an id not yet in the log.
    pub fn append(
        &mut self,
        sender: impl Into<String>,
        raw_text: impl Into<String>,
        reply_to: Option<ReplyRef>,
    ) -> Result<String, MessageLogError> {
        if let Some(reply) = &reply_to {
            if self.find_by_id(&reply.message_id).is_none() {
                return Err(MessageLogError::ReplyTargetNotFound(reply.message_id.clone()));
            }
        }

        let raw_text = raw_text.into();
        let id = format!("msg-{}", self.messages.len());
        self.messages.push(Message {
            id: id.clone(),
            sender: sender.into(),
            plain_text: strip_markup(&raw_text),
            raw_text,
            reply_to,
        });
        Ok(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Position of a message in the log.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Messages appended at or after position `from`.
    pub fn since(&self, from: usize) -> &[Message] {
        self.messages.get(from..).unwrap_or_default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
