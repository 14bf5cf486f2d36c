//! Per-student session state.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::domain::foundation::Timestamp;

use super::message_log::MessageLog;
use super::step::Step;
use super::text::summarize_short;

/// Mentor names a new session picks from.
pub const MENTOR_NAMES: &[&str] = &["Kofi", "Yaw", "Sam", "Ama", "Adwoa"];

/// Maximum entries kept in [`SessionMemory::recent_focus_points`].
pub const MAX_FOCUS_POINTS: usize = 5;

/// Picks a mentor name at random.
pub fn random_mentor_name() -> String {
    MENTOR_NAMES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Kofi")
        .to_string()
}

/// Rolling context about what the student has been saying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionMemory {
    /// Short summaries of recent answers, oldest first, deduplicated.
    pub recent_focus_points: VecDeque<String>,
    pub last_response_summary: Option<String>,
    pub current_lens: Option<String>,
    pub topic_focus: Option<String>,
}

impl SessionMemory {
    /// Folds a student message into memory.
    pub fn remember(&mut self, student_message: &str, lens: Option<&str>) {
        let summary = summarize_short(student_message);
        self.last_response_summary = Some(summary.clone());
        if let Some(lens) = lens {
            self.current_lens = Some(lens.to_string());
        }
        if !summary.is_empty() && !self.recent_focus_points.contains(&summary) {
            self.recent_focus_points.push_back(summary);
            while self.recent_focus_points.len() > MAX_FOCUS_POINTS {
                self.recent_focus_points.pop_front();
            }
        }
    }

    /// The last `n` focus points, oldest first.
    pub fn latest_focus_points(&self, n: usize) -> Vec<String> {
        let skip = self.recent_focus_points.len().saturating_sub(n);
        self.recent_focus_points.iter().skip(skip).cloned().collect()
    }
}

/// Everything the mentor conversation knows about one student.
///
/// Mutated only by the conversation machine, one turn at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "step_index")]
    pub step: Step,
    pub student_name: Option<String>,
    pub mentor_name: String,
    /// Answers keyed by the step index they were given at.
    pub answers: BTreeMap<i32, String>,
    pub current_question_text: Option<String>,
    pub awaiting_validation_refine: bool,
    pub has_rewatched_intro: bool,
    pub previous_topic_summary: Option<String>,
    pub current_problem_summary: Option<String>,
    pub memory: SessionMemory,
    pub message_log: MessageLog,
    /// Nudges issued per question id.
    #[serde(default)]
    pub intervention_counts: HashMap<String, u32>,
    pub profile_generated: bool,
    pub phase_completed: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SessionState {
    /// A fresh session at the first onboarding screen.
    pub fn new(mentor_name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            step: Step::initial(),
            student_name: None,
            mentor_name: mentor_name.into(),
            answers: BTreeMap::new(),
            current_question_text: None,
            awaiting_validation_refine: false,
            has_rewatched_intro: false,
            previous_topic_summary: None,
            current_problem_summary: None,
            memory: SessionMemory::default(),
            message_log: MessageLog::new(),
            intervention_counts: HashMap::new(),
            profile_generated: false,
            phase_completed: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A fresh session with a randomly chosen mentor.
    pub fn with_random_mentor() -> Self {
        Self::new(random_mentor_name())
    }

    /// Name used as the sender of the student's own messages.
    pub fn student_sender(&self) -> &str {
        self.student_name.as_deref().unwrap_or("You")
    }

    /// Name used when the mentor addresses the student.
    pub fn student_address(&self) -> &str {
        self.student_name.as_deref().unwrap_or("friend")
    }

    pub fn answer_at(&self, step_index: i32) -> Option<&str> {
        self.answers.get(&step_index).map(String::as_str)
    }

    pub fn store_answer(&mut self, step_index: i32, answer: impl Into<String>) {
        self.answers.insert(step_index, answer.into());
    }

    pub fn intervention_count(&self, question_id: &str) -> u32 {
        self.intervention_counts
            .get(question_id)
            .copied()
            .unwrap_or_default()
    }

    /// Starts the counter at zero the first time a question is presented.
    /// Later presentations leave it untouched.
    pub fn open_intervention_counter(&mut self, question_id: &str) {
        self.intervention_counts
            .entry(question_id.to_string())
            .or_insert(0);
    }

    pub fn record_intervention(&mut self, question_id: &str) -> u32 {
        let count = self
            .intervention_counts
            .entry(question_id.to_string())
            .or_insert(0);
        *count += 1;
        *count
    }

    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_random_mentor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod defaults {
        use super::*;

        #[test]
        fn new_session_starts_at_name_capture() {
            let state = SessionState::new("Ama");
            assert_eq!(state.step.index(), -4);
            assert_eq!(state.mentor_name, "Ama");
            assert!(state.answers.is_empty());
            assert!(state.message_log.is_empty());
        }

        #[test]
        fn random_mentor_comes_from_fixed_set() {
            for _ in 0..20 {
                let state = SessionState::with_random_mentor();
                assert!(MENTOR_NAMES.contains(&state.mentor_name.as_str()));
            }
        }

        #[test]
        fn sender_and_address_fall_back() {
            let mut state = SessionState::new("Kofi");
            assert_eq!(state.student_sender(), "You");
            assert_eq!(state.student_address(), "friend");
            state.student_name = Some("Kwame".into());
            assert_eq!(state.student_sender(), "Kwame");
        }
    }

    mod counters {
        use super::*;

        #[test]
        fn open_counter_only_resets_once() {
            let mut state = SessionState::new("Kofi");
            state.open_intervention_counter("q1a1_curiosity");
            state.record_intervention("q1a1_curiosity");
            state.open_intervention_counter("q1a1_curiosity");
            assert_eq!(state.intervention_count("q1a1_curiosity"), 1);
        }

        #[test]
        fn record_increments() {
            let mut state = SessionState::new("Kofi");
            assert_eq!(state.record_intervention("q"), 1);
            assert_eq!(state.record_intervention("q"), 2);
            assert_eq!(state.intervention_count("other"), 0);
        }
    }

    mod memory {
        use super::*;

        #[test]
        fn keeps_at_most_five_focus_points() {
            let mut memory = SessionMemory::default();
            for i in 0..8 {
                memory.remember(&format!("point {}", i), None);
            }
            assert_eq!(memory.recent_focus_points.len(), MAX_FOCUS_POINTS);
            assert_eq!(memory.recent_focus_points.front().unwrap(), "point 3");
            assert_eq!(memory.last_response_summary.as_deref(), Some("point 7"));
        }

        #[test]
        fn duplicate_points_are_not_repeated() {
            let mut memory = SessionMemory::default();
            memory.remember("water", None);
            memory.remember("water", Some("health"));
            assert_eq!(memory.recent_focus_points.len(), 1);
            assert_eq!(memory.current_lens.as_deref(), Some("health"));
        }

        #[test]
        fn latest_focus_points_takes_tail() {
            let mut memory = SessionMemory::default();
            for p in ["a", "b", "c", "d"] {
                memory.remember(p, None);
            }
            assert_eq!(memory.latest_focus_points(3), vec!["b", "c", "d"]);
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn step_persists_as_step_index() {
            let mut state = SessionState::new("Kofi");
            state.step = Step::Question(2);
            state.store_answer(5, "flooding");
            let json = serde_json::to_value(&state).unwrap();
            assert_eq!(json["step_index"], 7);
            assert_eq!(json["answers"]["5"], "flooding");

            let back: SessionState = serde_json::from_value(json).unwrap();
            assert_eq!(back, state);
        }
    }
}
