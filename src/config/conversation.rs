//! Conversation tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scaffolding::Thresholds;

/// Knobs for the intervention policy
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Nudges per question before the answer is accepted anyway
    #[serde(default = "default_max_interventions")]
    pub max_interventions: u32,

    /// Readiness score at or above which an answer is accepted
    #[serde(default = "default_readiness_threshold")]
    pub readiness_threshold: f64,
}

impl ConversationConfig {
    /// Policy thresholds with these overrides applied.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            max_interventions: self.max_interventions,
            readiness: self.readiness_threshold,
            ..Thresholds::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_interventions == 0 {
            return Err(ValidationError::InvalidMaxInterventions);
        }
        if !(0.0..=1.0).contains(&self.readiness_threshold) {
            return Err(ValidationError::InvalidThreshold(self.readiness_threshold));
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_interventions: default_max_interventions(),
            readiness_threshold: default_readiness_threshold(),
        }
    }
}

fn default_max_interventions() -> u32 {
    3
}

fn default_readiness_threshold() -> f64 {
    0.70
}
