//! Interview module - the scripted question set.
//!
//! Holds the 23 Step 1 questions across three phases, the phase intros,
//! the refine targets used by the validation loop, and the skill tags
//! consulted when building the purpose profile.

mod catalog;
mod phase;
mod skills;

pub use catalog::{
    first_slot_of, last_slot_of, question, question_by_id, questions, Question, RefineTarget,
    QUESTION_COUNT,
};
pub use phase::{Phase, PhaseIntro};
pub use skills::{detect_skills, skill_tags, SkillTag};
