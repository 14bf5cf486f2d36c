//! Intervention policy: what the mentor does with an answer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::signals::{Intent, Signals};

/// Tunable thresholds for the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub relevance: f64,
    pub specificity: f64,
    pub completeness: f64,
    /// Answers with at most this many words get `InviteExpand` over `Clarify`.
    pub short_length: usize,
    pub readiness: f64,
    /// Nudges allowed per question before progression is forced.
    pub max_interventions: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            relevance: 0.50,
            specificity: 0.45,
            completeness: 0.50,
            short_length: 8,
            readiness: 0.70,
            max_interventions: 3,
        }
    }
}

/// Mentor response to one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NoIntervene,
    MinimalValidation,
    ReAnchor,
    InviteExpand,
    Clarify,
}

impl Action {
    /// True for actions that hold the student on the same question.
    pub fn needs_intervention(&self) -> bool {
        !matches!(self, Action::NoIntervene | Action::MinimalValidation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::NoIntervene => "no_intervene",
            Action::MinimalValidation => "minimal_validation",
            Action::ReAnchor => "re_anchor",
            Action::InviteExpand => "invite_expand",
            Action::Clarify => "clarify",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps signals to an action. First matching rule wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterventionPolicy {
    thresholds: Thresholds,
}

impl InterventionPolicy {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn decide(&self, signals: &Signals) -> Action {
        let t = &self.thresholds;

        if signals.intent == Intent::Question {
            return Action::NoIntervene;
        }
        if signals.readiness_score >= t.readiness {
            return Action::MinimalValidation;
        }
        if signals.relevance_score < t.relevance {
            return Action::ReAnchor;
        }
        if signals.completeness_score < t.completeness
            || signals.specificity_score < t.specificity
            || signals.confusion
        {
            return if signals.length <= t.short_length {
                Action::InviteExpand
            } else {
                Action::Clarify
            };
        }
        Action::MinimalValidation
    }

    /// True once a question has used up its nudges.
    pub fn must_proceed(&self, interventions_so_far: u32) -> bool {
        interventions_so_far >= self.thresholds.max_interventions
    }

    /// Gate used by the conversation: nudge only when the action calls for
    /// it and the question still has nudges left.
    pub fn should_nudge(&self, action: Action, interventions_so_far: u32) -> bool {
        action.needs_intervention() && !self.must_proceed(interventions_so_far)
    }
}
