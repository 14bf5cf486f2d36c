//! Purpose profile: a mission title and one-line path summary.

use serde::{Deserialize, Serialize};

use crate::domain::interview::detect_skills;
use crate::domain::session::{SessionState, FIRST_QUESTION_INDEX, SKILLS_INDEX};
use crate::ports::ModelCall;

const PROFILE_SYSTEM: &str = "You are an inspirational pathfinder for Ghanaian students. Generate:
1. An aspirational Mission Title (5-7 words max).
2. A single encouraging sentence about their path.
Format: [MISSION TITLE] | [PATH SUMMARY]";

/// Steps of questions 1, 2 and 9, folded into the problem statement.
const PROBLEM_STEPS: [i32; 3] = [
    FIRST_QUESTION_INDEX,
    FIRST_QUESTION_INDEX + 1,
    FIRST_QUESTION_INDEX + 8,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeProfile {
    pub mission_title: String,
    pub path_summary: String,
}

impl PurposeProfile {
    /// Parses `TITLE | SUMMARY`. Both halves must be non-empty.
    pub fn parse(response: &str) -> Option<Self> {
        let (title, summary) = response.split_once('|')?;
        let clean = |s: &str| s.trim().trim_matches(|c| c == '[' || c == ']').trim().to_string();
        let mission_title = clean(title);
        let path_summary = clean(summary);
        if mission_title.is_empty() || path_summary.is_empty() {
            return None;
        }
        Some(Self {
            mission_title,
            path_summary,
        })
    }

    /// Mentor line presenting the profile.
    pub fn announcement(&self) -> String {
        format!(
            "Here is your Purpose Profile:\n\n**{}**\n{}",
            self.mission_title, self.path_summary
        )
    }
}

/// Problem statement folded from the stored answers, labelled by
/// question number.
pub fn problem_statement(state: &SessionState) -> String {
    let parts = PROBLEM_STEPS
        .iter()
        .map(|&step| {
            format!(
                "Q{}: {}",
                step - FIRST_QUESTION_INDEX + 1,
                state.answer_at(step).unwrap_or_default().trim()
            )
        })
        .collect::<Vec<_>>();
    format!("Problem: {}", parts.join(" | "))
}

/// Skills line: matched skill labels followed by the raw answer.
pub fn skills_statement(state: &SessionState) -> String {
    let raw = state.answer_at(SKILLS_INDEX).unwrap_or_default().trim();
    let labels = detect_skills(raw)
        .iter()
        .map(|tag| tag.label)
        .collect::<Vec<_>>();
    if labels.is_empty() {
        format!("Skills: {}", raw)
    } else {
        format!("Skills: {} ({})", labels.join(", "), raw)
    }
}

pub fn profile_call(state: &SessionState) -> ModelCall {
    ModelCall::new(
        PROFILE_SYSTEM,
        format!(
            "Student Profile:\n{}\n{}",
            problem_statement(state),
            skills_statement(state)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered_state() -> SessionState {
        let mut state = SessionState::new("Kofi");
        state.store_answer(5, "Flooding in our market");
        state.store_answer(6, "Kumasi Central Market");
        state.store_answer(13, "Drains are blocked by plastic waste");
        state.store_answer(28, "leadership, coding");
        state
    }

    mod parse {
        use super::*;

        #[test]
        fn splits_title_and_summary() {
            let profile =
                PurposeProfile::parse("Clean Drains Champion | You can lead the change.").unwrap();
            assert_eq!(profile.mission_title, "Clean Drains Champion");
            assert_eq!(profile.path_summary, "You can lead the change.");
        }

        #[test]
        fn strips_brackets() {
            let profile = PurposeProfile::parse("[Market Guardian] | [Keep going.]").unwrap();
            assert_eq!(profile.mission_title, "Market Guardian");
            assert_eq!(profile.path_summary, "Keep going.");
        }

        #[test]
        fn rejects_missing_separator_or_half() {
            assert!(PurposeProfile::parse("Just a title").is_none());
            assert!(PurposeProfile::parse(" | summary").is_none());
            assert!(PurposeProfile::parse("title | ").is_none());
        }
    }

    #[test]
    fn problem_statement_labels_three_answers() {
        assert_eq!(
            problem_statement(&answered_state()),
            "Problem: Q1: Flooding in our market | Q2: Kumasi Central Market | Q9: Drains are blocked by plastic waste"
        );
    }

    #[test]
    fn skills_statement_lists_matched_labels() {
        let line = skills_statement(&answered_state());
        assert!(line.starts_with("Skills: "));
        assert!(line.contains("leadership, coding"));
    }

    #[test]
    fn profile_call_carries_both_lines() {
        let call = profile_call(&answered_state());
        assert!(call.system_instruction.contains("[MISSION TITLE] | [PATH SUMMARY]"));
        assert!(call
            .user_message
            .starts_with("Student Profile:\nProblem: Q1: Flooding"));
    }

    #[test]
    fn announcement_bolds_title() {
        let profile = PurposeProfile {
            mission_title: "A".into(),
            path_summary: "B".into(),
        };
        assert_eq!(
            profile.announcement(),
            "Here is your Purpose Profile:\n\n**A**\nB"
        );
    }
}
