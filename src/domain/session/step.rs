//! Where a session currently is in the mentor conversation.
//!
//! Persisted documents store the position as a signed integer
//! (`step_index`). In memory it is a tagged [`Step`], and the table in
//! [`Step::from_index`] / [`Step::index`] is the only place the integers
//! appear.
//!
//! | index | step |
//! |---|---|
//! | -4..=-1 | onboarding screens |
//! | 0..=4 | greeting beats |
//! | 5..=27 | question slots 0..=22 |
//! | 28 | skills prompt |
//! | 29..=99 | completed |
//! | 100..=103, 150, 151 | side states |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::interview::{question, Phase, Question, QUESTION_COUNT};

/// Index of the first question step.
pub const FIRST_QUESTION_INDEX: i32 = 5;
/// Index of the skills prompt that follows the last question.
pub const SKILLS_INDEX: i32 = FIRST_QUESTION_INDEX + QUESTION_COUNT as i32;
/// Index used for every completed session.
pub const COMPLETED_INDEX: i32 = SKILLS_INDEX + 1;

/// A persisted step index that maps to no known step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("unknown step index: {0}")]
    UnknownIndex(i32),
}

/// Pre-chat onboarding screens, navigated with Next/Back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingScreen {
    NameCapture,
    ContextIntro,
    SdgVideo,
    FinalVideo,
}

/// Scripted small-talk beats before the first question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreetingBeat {
    /// Mentor has said hello; waiting for the student's reply.
    Opening,
    /// Mentor asked how the SDG videos felt.
    SdgReaction,
    /// Mentor asked whether to continue or rewatch.
    ContinueOrRewatch,
    /// Mentor asked whether the student is ready.
    ReadyCheck,
    /// Mentor gave a last encouraging line.
    Encouragement,
}

/// Named detours outside the linear flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideState {
    /// "I believe you are ready now?" after a rewatch.
    PostRewatchCheck,
    /// Asked what the student is unsure about.
    Unsure,
    /// Asked "Can we start now?".
    StartNow,
    /// Student said they were not ready at the ready check.
    NotReady,
    /// Validation summary shown, waiting for approve or refine.
    AwaitingApproval,
    /// Asked which section (what/who/why) to refine.
    ChooseRefineTarget,
}

/// Mutually exclusive conversation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    Onboarding,
    Greeting,
    Questioning,
    SideState,
    Completed,
}

/// Position of a session in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Step {
    Onboarding(OnboardingScreen),
    Greeting(GreetingBeat),
    /// Waiting for the answer to the question at this slot.
    Question(usize),
    SkillsPrompt,
    Completed,
    Side(SideState),
}

impl Step {
    /// Where every new (or repaired) session starts.
    pub const fn initial() -> Self {
        Step::Onboarding(OnboardingScreen::NameCapture)
    }

    /// Step for a question slot. Slots past the last question land on the
    /// skills prompt.
    pub fn question(slot: usize) -> Self {
        if slot < QUESTION_COUNT {
            Step::Question(slot)
        } else {
            Step::SkillsPrompt
        }
    }

    /// Translates a persisted index into a step.
    pub fn from_index(index: i32) -> Result<Self, StepError> {
        use GreetingBeat::*;
        use OnboardingScreen::*;
        use SideState::*;

        let step = match index {
            -4 => Step::Onboarding(NameCapture),
            -3 => Step::Onboarding(ContextIntro),
            -2 => Step::Onboarding(SdgVideo),
            -1 => Step::Onboarding(FinalVideo),
            0 => Step::Greeting(Opening),
            1 => Step::Greeting(SdgReaction),
            2 => Step::Greeting(ContinueOrRewatch),
            3 => Step::Greeting(ReadyCheck),
            4 => Step::Greeting(Encouragement),
            i if (FIRST_QUESTION_INDEX..SKILLS_INDEX).contains(&i) => {
                Step::Question((i - FIRST_QUESTION_INDEX) as usize)
            }
            SKILLS_INDEX => Step::SkillsPrompt,
            i if (COMPLETED_INDEX..100).contains(&i) => Step::Completed,
            100 => Step::Side(PostRewatchCheck),
            101 => Step::Side(Unsure),
            102 => Step::Side(StartNow),
            103 => Step::Side(NotReady),
            150 => Step::Side(AwaitingApproval),
            151 => Step::Side(ChooseRefineTarget),
            other => return Err(StepError::UnknownIndex(other)),
        };
        Ok(step)
    }

    /// Translates the step into its persisted index.
    pub fn index(&self) -> i32 {
        use GreetingBeat::*;
        use OnboardingScreen::*;
        use SideState::*;

        match self {
            Step::Onboarding(NameCapture) => -4,
            Step::Onboarding(ContextIntro) => -3,
            Step::Onboarding(SdgVideo) => -2,
            Step::Onboarding(FinalVideo) => -1,
            Step::Greeting(Opening) => 0,
            Step::Greeting(SdgReaction) => 1,
            Step::Greeting(ContinueOrRewatch) => 2,
            Step::Greeting(ReadyCheck) => 3,
            Step::Greeting(Encouragement) => 4,
            Step::Question(slot) => FIRST_QUESTION_INDEX + *slot as i32,
            Step::SkillsPrompt => SKILLS_INDEX,
            Step::Completed => COMPLETED_INDEX,
            Step::Side(PostRewatchCheck) => 100,
            Step::Side(Unsure) => 101,
            Step::Side(StartNow) => 102,
            Step::Side(NotReady) => 103,
            Step::Side(AwaitingApproval) => 150,
            Step::Side(ChooseRefineTarget) => 151,
        }
    }

    /// The single active mode for this step.
    pub fn mode(&self) -> ConversationMode {
        match self {
            Step::Onboarding(_) => ConversationMode::Onboarding,
            Step::Greeting(_) => ConversationMode::Greeting,
            Step::Question(_) | Step::SkillsPrompt => ConversationMode::Questioning,
            Step::Completed => ConversationMode::Completed,
            Step::Side(_) => ConversationMode::SideState,
        }
    }

    pub fn is_onboarding(&self) -> bool {
        matches!(self, Step::Onboarding(_))
    }

    /// Slot of the question awaiting an answer, if any.
    pub fn question_slot(&self) -> Option<usize> {
        match self {
            Step::Question(slot) => Some(*slot),
            _ => None,
        }
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&'static Question> {
        self.question_slot().and_then(question)
    }

    /// Phase of the current question, if any.
    pub fn phase(&self) -> Option<Phase> {
        self.current_question().map(|q| q.phase)
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::initial()
    }
}

impl From<Step> for i32 {
    fn from(step: Step) -> Self {
        step.index()
    }
}

impl TryFrom<i32> for Step {
    type Error = StepError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Step::from_index(index)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Question(slot) => write!(f, "question {} (step {})", slot, self.index()),
            other => write!(f, "{:?} (step {})", other, other.index()),
        }
    }
}

impl OnboardingScreen {
    /// Screen shown after Next, or `None` when Next leaves onboarding.
    pub fn next(&self) -> Option<OnboardingScreen> {
        match self {
            OnboardingScreen::NameCapture => Some(OnboardingScreen::ContextIntro),
            OnboardingScreen::ContextIntro => Some(OnboardingScreen::SdgVideo),
            OnboardingScreen::SdgVideo => Some(OnboardingScreen::FinalVideo),
            OnboardingScreen::FinalVideo => None,
        }
    }

    /// Screen shown after Back, or `None` on the first screen.
    pub fn previous(&self) -> Option<OnboardingScreen> {
        match self {
            OnboardingScreen::NameCapture => None,
            OnboardingScreen::ContextIntro => Some(OnboardingScreen::NameCapture),
            OnboardingScreen::SdgVideo => Some(OnboardingScreen::ContextIntro),
            OnboardingScreen::FinalVideo => Some(OnboardingScreen::SdgVideo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &[i32] = &[
        -4, -3, -2, -1, 0, 1, 2, 3, 4, 5, 14, 16, 18, 23, 24, 27, 28, 29, 100, 101, 102, 103,
        150, 151,
    ];

    mod translation {
        use super::*;

        #[test]
        fn known_indices_roundtrip() {
            for &i in KNOWN {
                let step = Step::from_index(i).unwrap();
                assert_eq!(step.index(), i, "index {}", i);
            }
        }

        #[test]
        fn question_steps_map_to_slots() {
            assert_eq!(Step::from_index(5).unwrap(), Step::Question(0));
            assert_eq!(Step::from_index(27).unwrap(), Step::Question(22));
            assert_eq!(Step::from_index(28).unwrap(), Step::SkillsPrompt);
        }

        #[test]
        fn completed_range_normalizes() {
            assert_eq!(Step::from_index(57).unwrap(), Step::Completed);
            assert_eq!(Step::Completed.index(), 29);
        }

        #[test]
        fn unknown_indices_are_errors() {
            for i in [-5, 104, 149, 152, 1000] {
                assert_eq!(Step::from_index(i), Err(StepError::UnknownIndex(i)));
            }
        }

        #[test]
        fn serializes_as_integer() {
            let json = serde_json::to_string(&Step::Question(9)).unwrap();
            assert_eq!(json, "14");
            let step: Step = serde_json::from_str("151").unwrap();
            assert_eq!(step, Step::Side(SideState::ChooseRefineTarget));
            assert!(serde_json::from_str::<Step>("200").is_err());
        }

        #[test]
        fn question_beyond_catalog_is_skills_prompt() {
            assert_eq!(Step::question(23), Step::SkillsPrompt);
        }
    }

    mod modes {
        use super::*;

        #[test]
        fn every_step_has_exactly_the_mode_of_its_range() {
            for &i in KNOWN {
                let mode = Step::from_index(i).unwrap().mode();
                let expected = match i {
                    i if i < 0 => ConversationMode::Onboarding,
                    0..=4 => ConversationMode::Greeting,
                    5..=28 => ConversationMode::Questioning,
                    29..=99 => ConversationMode::Completed,
                    _ => ConversationMode::SideState,
                };
                assert_eq!(mode, expected, "index {}", i);
            }
        }

        #[test]
        fn current_question_only_for_question_steps() {
            assert_eq!(Step::Question(11).current_question().unwrap().id, "q1b3_who");
            assert!(Step::SkillsPrompt.current_question().is_none());
            assert_eq!(Step::Question(19).phase(), Some(Phase::PurposeAnchors));
        }
    }

    mod onboarding {
        use super::*;

        #[test]
        fn next_walks_the_screens_in_order() {
            let mut screen = OnboardingScreen::NameCapture;
            let mut seen = vec![screen];
            while let Some(next) = screen.next() {
                seen.push(next);
                screen = next;
            }
            assert_eq!(seen.len(), 4);
            assert_eq!(screen, OnboardingScreen::FinalVideo);
        }

        #[test]
        fn previous_stops_at_name_capture() {
            assert_eq!(OnboardingScreen::NameCapture.previous(), None);
            assert_eq!(
                OnboardingScreen::ContextIntro.previous(),
                Some(OnboardingScreen::NameCapture)
            );
        }
    }
}
