//! The three interview phases of Step 1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interview phase a question belongs to.
///
/// Phases run in a fixed order: `Discovery` → `Defining` → `PurposeAnchors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Phase 1A: identifying a problem that sparks curiosity.
    Discovery,
    /// Phase 1B: structured who/what/where/why analysis.
    Defining,
    /// Phase 1C: connecting the problem to the student's own role.
    PurposeAnchors,
}

impl Phase {
    /// Returns all phases in interview order.
    pub fn all() -> &'static [Phase] {
        &[Phase::Discovery, Phase::Defining, Phase::PurposeAnchors]
    }

    /// Short code used in the product copy ("1A", "1B", "1C").
    pub fn code(&self) -> &'static str {
        match self {
            Phase::Discovery => "1A",
            Phase::Defining => "1B",
            Phase::PurposeAnchors => "1C",
        }
    }

    /// Returns the intro text shown when the phase begins.
    pub fn intro(&self) -> &'static PhaseIntro {
        match self {
            Phase::Discovery => &DISCOVERY_INTRO,
            Phase::Defining => &DEFINING_INTRO,
            Phase::PurposeAnchors => &PURPOSE_ANCHORS_INTRO,
        }
    }

    /// Tag used when folding answers into the validation summary prompt.
    pub fn summary_tag(&self) -> &'static str {
        match self {
            Phase::Discovery => "DISCOVERY",
            Phase::Defining => "DEFINING",
            Phase::PurposeAnchors => "PURPOSE",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase {}", self.code())
    }
}

/// Title, purpose, and optional facilitator line for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseIntro {
    pub title: &'static str,
    pub purpose: &'static str,
    pub facilitator_flow: Option<&'static str>,
}

static DISCOVERY_INTRO: PhaseIntro = PhaseIntro {
    title: "THE FIRST SPARK",
    purpose: "To help the participant identify a real problem in their community that sparks curiosity, how they came to notice it, and how it affects people around them in a culturally relevant way.",
    facilitator_flow: Some(
        "So, to start, let's focus on what you've personally noticed in your community that ignites your curiosity.",
    ),
};

static DEFINING_INTRO: PhaseIntro = PhaseIntro {
    title: "UNDERSTANDING THE 'WHY'",
    purpose: "To move from storytelling and observation to a structured understanding of the problem by identifying the \"who, where, why, and what\" clearly.",
    facilitator_flow: None,
};

static PURPOSE_ANCHORS_INTRO: PhaseIntro = PhaseIntro {
    title: "FINDING YOUR ROLE",
    purpose: "To bridge your analysis of the problem with your personal motivation and sense of agency. This phase is about connecting the 'what' to the 'why you'.",
    facilitator_flow: None,
};
