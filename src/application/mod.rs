//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers load a session through [`SessionStoreAdapter`], apply one
//! conversation operation under the student's [`SessionRegistry`] lock, and
//! save the result.

pub mod handlers;
mod registry;
mod session_store;

pub use handlers::{
    GenerateProfileCommand, GenerateProfileError, GenerateProfileHandler, GenerateTextCommand,
    GenerateTextError, GenerateTextHandler, GetSessionHandler, GetSessionQuery, NavigateCommand,
    NavigateError, NavigateHandler, Navigation, OpenSessionCommand, OpenSessionHandler,
    SessionTurn, SessionView, SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler,
};
pub use registry::SessionRegistry;
pub use session_store::{restart_interrupted_onboarding, SessionStoreAdapter};
