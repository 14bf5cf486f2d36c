//! Session handlers.
//!
//! Every command follows the same shape: take the student's lock, load the
//! session, apply one machine operation, save, and return the emitted
//! messages with the new view.

mod generate_profile;
mod get_session;
mod navigate;
mod open_session;
mod submit_message;
mod view;

pub use generate_profile::{GenerateProfileCommand, GenerateProfileError, GenerateProfileHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use navigate::{NavigateCommand, NavigateError, NavigateHandler, Navigation};
pub use open_session::{OpenSessionCommand, OpenSessionHandler};
pub use submit_message::{SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler};
pub use view::{SessionTurn, SessionView};
