//! Session module - the durable per-student conversation record.
//!
//! - [`Step`]: tagged position in the conversation, persisted as an integer
//! - [`SessionState`]: answers, memory, counters, and flags for one student
//! - [`MessageLog`]: append-only chat transcript with reply quoting

mod message_log;
mod state;
mod step;
pub mod text;

pub use message_log::{Message, MessageLog, MessageLogError, ReplyRef};
pub use state::{
    random_mentor_name, SessionMemory, SessionState, MAX_FOCUS_POINTS, MENTOR_NAMES,
};
pub use step::{
    ConversationMode, GreetingBeat, OnboardingScreen, SideState, Step, StepError,
    COMPLETED_INDEX, FIRST_QUESTION_INDEX, SKILLS_INDEX,
};
