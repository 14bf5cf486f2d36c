//! Conversation module - the step-driven mentor dialogue.
//!
//! [`ConversationMachine`] applies each user action to a session: onboarding
//! navigation, greeting small talk, the scaffolded interview, the
//! validation and refine loop, and the purpose profile. Scripted lines and
//! model prompts live in [`prompts`].

mod machine;
mod profile;
pub mod prompts;

pub use machine::{ConversationMachine, TurnError, TurnOutcome, MIN_NAME_CHARS};
pub use profile::{problem_statement, profile_call, skills_statement, PurposeProfile};
