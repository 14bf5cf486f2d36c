//! Scaffolding module - answer quality and nudges.
//!
//! Decides, for each interview answer, whether the mentor accepts it or
//! nudges the student to go deeper:
//!
//! 1. [`SignalAnalyzer`] scores the answer (lexical scores plus a
//!    model-graded readiness score)
//! 2. [`InterventionPolicy`] maps the scores to an [`Action`]
//! 3. [`compose`] turns a nudging action into a [`MicroInstruction`] for the
//!    model, and [`filter_output`] trims what comes back

mod composer;
mod phrases;
mod policy;
mod signals;

pub use composer::{
    compose, fallback_rephrase, filter_output, max_words_for, rephrase_call, MemorySnapshot,
    MicroInstruction, OutputFormat, NUDGE_MAX_OUTPUT_TOKENS,
};
pub use phrases::{FixedPicker, PhrasePicker, RandomPicker};
pub use policy::{Action, InterventionPolicy, Thresholds};
pub use signals::{
    Intent, Readiness, SignalAnalyzer, Signals, TextSignals, CONFUSION_KEYWORDS,
    NEUTRAL_READINESS,
};
