//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod generate_text;
pub mod session;

pub use generate_text::{
    GenerateTextCommand, GenerateTextError, GenerateTextHandler, DEFAULT_SYSTEM_INSTRUCTION,
    NO_RESPONSE_TEXT,
};
pub use session::{
    GenerateProfileCommand, GenerateProfileError, GenerateProfileHandler, GetSessionHandler,
    GetSessionQuery, NavigateCommand, NavigateError, NavigateHandler, Navigation,
    OpenSessionCommand, OpenSessionHandler, SessionTurn, SessionView, SubmitMessageCommand,
    SubmitMessageError, SubmitMessageHandler,
};
