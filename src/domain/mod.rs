//! Domain layer containing the mentoring conversation and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors)
//! - `interview` - The Step 1 question catalog, phases and skill tags
//! - `session` - Session state, step layout and the message log
//! - `scaffolding` - Answer signals, intervention policy and nudge composition
//! - `conversation` - The conversation state machine

pub mod conversation;
pub mod foundation;
pub mod interview;
pub mod scaffolding;
pub mod session;
