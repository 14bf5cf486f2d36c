//! The fixed 23-question interview.
//!
//! Questions are addressed by *slot* (0-based position in the interview).
//! Slots are stable: persisted answers and refine targets depend on them.

use serde::{Deserialize, Serialize};

use super::Phase;

/// Number of questions across all three phases.
pub const QUESTION_COUNT: usize = 23;

/// One interview question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub phase: Phase,
    /// Analysis category, only present for Defining questions.
    pub category: Option<&'static str>,
    pub title: &'static str,
    pub help_text: &'static str,
}

impl Question {
    const fn discovery(id: &'static str, title: &'static str, help_text: &'static str) -> Self {
        Self {
            id,
            phase: Phase::Discovery,
            category: None,
            title,
            help_text,
        }
    }

    const fn defining(
        id: &'static str,
        category: &'static str,
        title: &'static str,
        help_text: &'static str,
    ) -> Self {
        Self {
            id,
            phase: Phase::Defining,
            category: Some(category),
            title,
            help_text,
        }
    }

    const fn anchor(id: &'static str, title: &'static str, help_text: &'static str) -> Self {
        Self {
            id,
            phase: Phase::PurposeAnchors,
            category: None,
            title,
            help_text,
        }
    }

    /// Returns this question's slot.
    pub fn slot(&self) -> usize {
        QUESTIONS
            .iter()
            .position(|q| q.id == self.id)
            .unwrap_or_default()
    }

    /// Label used when folding an answer into the summary prompt.
    ///
    /// `DISCOVERY - {title}` or `DEFINING - {category}: {title}`.
    pub fn summary_label(&self) -> String {
        match self.category {
            Some(category) => format!("{} - {}: {}", self.phase.summary_tag(), category, self.title),
            None => format!("{} - {}", self.phase.summary_tag(), self.title),
        }
    }
}

static QUESTIONS: [Question; QUESTION_COUNT] = [
    // Phase 1A - Discovery
    Question::discovery(
        "q1a1_curiosity",
        "What problem have you noticed in your community that ignites a curiosity in you?",
        "Think of issues close to home in Ghana that make you wonder 'Why?' or 'How can we fix this?'",
    ),
    Question::discovery(
        "q1a2_notice",
        "How did you first notice this problem? (Through experience, observation, or from someone else?)",
        "Share the specific trigger that made it personal, like a conversation at a trotro stop.",
    ),
    Question::discovery(
        "q1a3_affected",
        "Who do you see being most affected by this issue?",
        "Focus on the people closest to the pain, like families in your neighborhood.",
    ),
    Question::discovery(
        "q1a4_personal",
        "What makes this issue important to you personally?",
        "Connect it to your emotions or values, rooted in your Ghanaian context.",
    ),
    Question::discovery(
        "q1a5_example",
        "Can you describe a specific situation or example that made you realize it's a real problem?",
        "Stories make the issue vivid and real, like a local market tale.",
    ),
    Question::discovery(
        "q1a6_efforts",
        "Have you seen anyone or any group trying to fix this problem before? What did they do?",
        "This shows what's been tried and gaps, perhaps a church group or youth club.",
    ),
    Question::discovery(
        "q1a7_causes",
        "What do you think causes this problem in your community?",
        "Pinpoint the everyday triggers, like seasonal farming challenges.",
    ),
    Question::discovery(
        "q1a8_future",
        "If this problem continues, what do you think will happen in the next few years?",
        "Imagine the ripple effects on your community.",
    ),
    Question::discovery(
        "q1a9_wish",
        "What do you wish could change about it?",
        "This sparks your vision for better, inspired by Ghanaian resilience.",
    ),
    // Phase 1B - Defining
    Question::defining(
        "q1b1_what",
        "What",
        "What exactly is the problem or issue you've identified?",
        "Define the core issue clearly.",
    ),
    Question::defining(
        "q1b2_where",
        "Where",
        "Where does it happen most often? (Community, workplaces, schools, etc.)",
        "Narrow the location for focus.",
    ),
    Question::defining(
        "q1b3_who",
        "Who",
        "Who are the main people affected by this problem?",
        "Highlight the vulnerable.",
    ),
    Question::defining(
        "q1b4_when",
        "When",
        "When does it usually happen? (Certain seasons, life stages, or times?)",
        "Timing reveals patterns.",
    ),
    Question::defining(
        "q1b5_why",
        "Why",
        "Why do you think this problem keeps happening?",
        "Uncover the persistence.",
    ),
    Question::defining(
        "q1b6_how",
        "How",
        "How does this issue affect people or the community as a whole?",
        "Show the broader ripple.",
    ),
    Question::defining(
        "q1b7_root",
        "Root Causes",
        "What do you think are the main root causes behind this problem?",
        "Go beyond symptoms.",
    ),
    Question::defining(
        "q1b8_solutions",
        "Possible Solutions",
        "What do you think can be done to reduce or solve it?",
        "Brainstorm feasible fixes.",
    ),
    Question::defining(
        "q1b9_impact",
        "Impact of Solution",
        "If this problem were solved, how would your community or the people affected benefit?",
        "Envision the positive change.",
    ),
    Question::defining(
        "q1b10_role",
        "Your Role",
        "What role do you see yourself playing in making this change happen?",
        "Link your strengths to action.",
    ),
    // Phase 1C - Purpose anchors
    Question::anchor(
        "q1c1_role",
        "Which role would you most prefer to take in addressing this issue?",
        "This helps you clarify how you naturally engage with change.",
    ),
    Question::anchor(
        "q1c2_clarity",
        "On a scale of 1-5, how clear and meaningful does this problem feel to you right now?",
        "Helps track user clarity across iterations.",
    ),
    Question::anchor(
        "q1c3_commitment",
        "Name one small, realistic action you could take in the next 2-4 weeks to move this problem forward.",
        "Translates intention into agency.",
    ),
    Question::anchor(
        "q1c4_impact",
        "Imagine three years from now: what difference would your action make in your community?",
        "Anchors motivation in long-term purpose.",
    ),
];

/// Returns every question in interview order.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

/// Returns the question at `slot`, if any.
pub fn question(slot: usize) -> Option<&'static Question> {
    QUESTIONS.get(slot)
}

/// Looks a question up by its stable id.
pub fn question_by_id(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// First slot belonging to `phase`.
pub fn first_slot_of(phase: Phase) -> usize {
    QUESTIONS
        .iter()
        .position(|q| q.phase == phase)
        .unwrap_or_default()
}

/// Last slot belonging to `phase`.
pub fn last_slot_of(phase: Phase) -> usize {
    QUESTIONS
        .iter()
        .rposition(|q| q.phase == phase)
        .unwrap_or_default()
}

/// Section of the defined problem the student can go back and rework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefineTarget {
    What,
    Who,
    Why,
}

impl RefineTarget {
    /// Picks a target from free text. Checked in the order what, who, why.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("what") {
            Some(RefineTarget::What)
        } else if lower.contains("who") {
            Some(RefineTarget::Who)
        } else if lower.contains("why") {
            Some(RefineTarget::Why)
        } else {
            None
        }
    }

    /// Id of the Defining question that restarts this section.
    pub fn question_id(&self) -> &'static str {
        match self {
            RefineTarget::What => "q1b1_what",
            RefineTarget::Who => "q1b3_who",
            RefineTarget::Why => "q1b5_why",
        }
    }

    /// Slot of the Defining question that restarts this section.
    pub fn slot(&self) -> usize {
        question_by_id(self.question_id())
            .map(Question::slot)
            .unwrap_or_else(|| first_slot_of(Phase::Defining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mod catalog {
        use super::*;

        #[test]
        fn phase_sizes_are_nine_ten_four() {
            let count = |p| questions().iter().filter(|q| q.phase == p).count();
            assert_eq!(count(Phase::Discovery), 9);
            assert_eq!(count(Phase::Defining), 10);
            assert_eq!(count(Phase::PurposeAnchors), 4);
        }

        #[test]
        fn ids_are_unique() {
            let ids: HashSet<_> = questions().iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), QUESTION_COUNT);
        }

        #[test]
        fn only_defining_questions_have_categories() {
            for q in questions() {
                assert_eq!(q.category.is_some(), q.phase == Phase::Defining, "{}", q.id);
            }
        }

        #[test]
        fn phase_boundaries() {
            assert_eq!(first_slot_of(Phase::Defining), 9);
            assert_eq!(last_slot_of(Phase::Defining), 18);
            assert_eq!(first_slot_of(Phase::PurposeAnchors), 19);
            assert_eq!(last_slot_of(Phase::PurposeAnchors), 22);
        }

        #[test]
        fn slot_matches_position() {
            for (i, q) in questions().iter().enumerate() {
                assert_eq!(q.slot(), i);
            }
        }

        #[test]
        fn summary_label_includes_category_for_defining() {
            let q = question_by_id("q1b3_who").unwrap();
            assert_eq!(
                q.summary_label(),
                "DEFINING - Who: Who are the main people affected by this problem?"
            );
            let q = question(0).unwrap();
            assert!(q.summary_label().starts_with("DISCOVERY - What problem"));
        }
    }

    mod refine_target {
        use super::*;

        #[test]
        fn detects_each_target() {
            assert_eq!(RefineTarget::detect("the WHO part"), Some(RefineTarget::Who));
            assert_eq!(RefineTarget::detect("why"), Some(RefineTarget::Why));
            assert_eq!(RefineTarget::detect("nothing"), None);
        }

        #[test]
        fn what_wins_over_later_words() {
            assert_eq!(
                RefineTarget::detect("what and who"),
                Some(RefineTarget::What)
            );
        }

        #[test]
        fn targets_map_to_defining_slots() {
            assert_eq!(RefineTarget::What.slot(), 9);
            assert_eq!(RefineTarget::Who.slot(), 11);
            assert_eq!(RefineTarget::Why.slot(), 13);
        }
    }
}
