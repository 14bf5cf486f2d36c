//! Answer quality signals.
//!
//! Lexical scores are computed locally; the readiness score comes from a
//! model-graded assessment and is blended into completeness.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::domain::session::text::word_count;
use crate::ports::{LanguageModel, ModelCall};

/// Hedge words that mark a confused or vague answer.
pub const CONFUSION_KEYWORDS: &[&str] = &[
    "maybe",
    "kinda",
    "i don't know",
    "not sure",
    "stuff",
    "things",
    "etc",
];

/// Readiness used when the assessment cannot be obtained or read.
pub const NEUTRAL_READINESS: f64 = 0.5;

static CONCRETENESS_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(e\.g\.|for example|because|when|where|who|how|numbers|[0-9]+)\b")
        .expect("concreteness pattern is valid")
});

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("json object pattern is valid"));

const READINESS_INSTRUCTION: &str = "You are an expert educational assessor for Ghanaian students. Score the student's answer (0.0-1.0) on how well it addresses the question. Criteria: specific, complete, culturally relevant, insightful. Respond ONLY with JSON: {\"readiness_score\": 0.85, \"reason\": \"Brief reason (under 50 words)\"}. Use neutral Ghanaian context.";

/// Whether the student asked something or answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Question,
    Answer,
}

impl Intent {
    /// `Question` when the trimmed text ends with `?`.
    pub fn of(text: &str) -> Self {
        if text.trim().ends_with('?') {
            Intent::Question
        } else {
            Intent::Answer
        }
    }
}

/// Model-graded readiness of an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readiness {
    pub score: f64,
    pub reason: String,
}

#[derive(Deserialize)]
struct ReadinessPayload {
    readiness_score: Option<f64>,
    reason: Option<String>,
}

impl Readiness {
    /// Neutral readiness when the assessment could not be read.
    pub fn parsing_failed() -> Self {
        Self {
            score: NEUTRAL_READINESS,
            reason: "Parsing failed".to_string(),
        }
    }

    /// Neutral readiness when the assessment call failed.
    pub fn errored() -> Self {
        Self {
            score: NEUTRAL_READINESS,
            reason: "Error".to_string(),
        }
    }

    /// Reads the first `{...}` object out of a model response.
    ///
    /// A missing score counts as 0.
    pub fn parse(response: &str) -> Self {
        let Some(found) = JSON_OBJECT.find(response) else {
            return Self::parsing_failed();
        };
        match serde_json::from_str::<ReadinessPayload>(found.as_str()) {
            Ok(payload) => Self {
                score: payload.readiness_score.unwrap_or(0.0).clamp(0.0, 1.0),
                reason: payload.reason.unwrap_or_default(),
            },
            Err(_) => Self::parsing_failed(),
        }
    }

    /// The assessor call for one answer.
    pub fn assessment_call(question: &str, answer: &str) -> ModelCall {
        ModelCall::new(
            READINESS_INSTRUCTION,
            format!("Question: \"{}\"\nAnswer: \"{}\"", question, answer),
        )
    }
}

/// Locally computed scores for one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSignals {
    pub length: usize,
    pub specificity_score: f64,
    pub relevance_score: f64,
    /// Completeness before blending with readiness.
    pub base_completeness: f64,
    pub confusion: bool,
    pub intent: Intent,
}

impl TextSignals {
    pub fn analyze(answer: &str, question: Option<&str>) -> Self {
        let length = word_count(answer);
        let specificity_score = specificity(answer, length);
        let relevance_score = question.map(|q| relevance(answer, q)).unwrap_or(1.0);
        let base_completeness =
            0.5 * (length as f64 / 30.0).min(1.0) + 0.5 * specificity_score;

        Self {
            length,
            specificity_score,
            relevance_score,
            base_completeness,
            confusion: has_confusion(answer),
            intent: Intent::of(answer),
        }
    }
}

/// Full signal set used by the intervention policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub length: usize,
    pub specificity_score: f64,
    pub relevance_score: f64,
    /// Completeness blended 0.7 / 0.3 with readiness.
    pub completeness_score: f64,
    pub confusion: bool,
    pub intent: Intent,
    pub readiness_score: f64,
    pub readiness_reason: String,
}

impl Signals {
    pub fn combine(text: TextSignals, readiness: Readiness) -> Self {
        Self {
            length: text.length,
            specificity_score: text.specificity_score,
            relevance_score: text.relevance_score,
            completeness_score: text.base_completeness * 0.7 + readiness.score * 0.3,
            confusion: text.confusion,
            intent: text.intent,
            readiness_score: readiness.score,
            readiness_reason: readiness.reason,
        }
    }
}

/// Scores answers, asking the model for readiness.
#[derive(Clone)]
pub struct SignalAnalyzer {
    model: Arc<dyn LanguageModel>,
}

impl SignalAnalyzer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn analyze(&self, answer: &str, question: Option<&str>) -> Signals {
        let text = TextSignals::analyze(answer, question);
        let readiness = self.assess_readiness(question.unwrap_or_default(), answer).await;
        Signals::combine(text, readiness)
    }

    /// Never fails; errors become neutral readiness.
    pub async fn assess_readiness(&self, question: &str, answer: &str) -> Readiness {
        match self
            .model
            .complete(Readiness::assessment_call(question, answer))
            .await
        {
            Ok(response) => Readiness::parse(&response),
            Err(err) => {
                warn!(error = %err, "Readiness assessment failed");
                Readiness::errored()
            }
        }
    }
}

fn specificity(answer: &str, length: usize) -> f64 {
    let markers = CONCRETENESS_MARKERS.find_iter(answer).count() as f64;
    ((markers + length as f64 / 15.0) / 2.0).min(1.0)
}

fn content_words(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.chars().count() > 3)
        .collect()
}

/// Share of the question's content words that the answer repeats.
///
/// Full relevance when the question has no content words.
fn relevance(answer: &str, question: &str) -> f64 {
    let question_words = content_words(question);
    if question_words.is_empty() {
        return 1.0;
    }
    let answer_words = content_words(answer);
    let matched = question_words
        .iter()
        .filter(|w| answer_words.contains(*w))
        .count();
    matched as f64 / question_words.len() as f64
}

fn has_confusion(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    CONFUSION_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use proptest::prelude::*;

    const Q0: &str =
        "What problem have you noticed in your community that ignites a curiosity in you?";

    mod text_signals {
        use super::*;

        #[test]
        fn vague_one_word_answer_scores_low() {
            let s = TextSignals::analyze("stuff", Some(Q0));
            assert_eq!(s.length, 1);
            assert_eq!(s.relevance_score, 0.0);
            assert!(s.specificity_score < 0.45);
            assert!(s.confusion);
            assert_eq!(s.intent, Intent::Answer);
        }

        #[test]
        fn relevance_counts_unique_question_words() {
            // question content words: what, problem, have, noticed, your,
            // community, that, ignites, curiosity
            let s = TextSignals::analyze("The problem in my community is flooding.", Some(Q0));
            assert!((s.relevance_score - 2.0 / 9.0).abs() < 1e-9);
        }

        #[test]
        fn missing_question_means_full_relevance() {
            assert_eq!(TextSignals::analyze("anything", None).relevance_score, 1.0);
            assert_eq!(TextSignals::analyze("anything", Some("a b c")).relevance_score, 1.0);
        }

        #[test]
        fn concrete_markers_raise_specificity() {
            let plain = TextSignals::analyze("roads are bad", None);
            let concrete =
                TextSignals::analyze("roads are bad because 3 buses crashed when it rained", None);
            assert!(concrete.specificity_score > plain.specificity_score);
        }

        #[test]
        fn question_mark_means_question_intent() {
            assert_eq!(Intent::of("what do you mean?  "), Intent::Question);
            assert_eq!(Intent::of("I mean this."), Intent::Answer);
        }

        #[test]
        fn hedge_phrase_with_capital_is_detected() {
            assert!(TextSignals::analyze("I don't know really", None).confusion);
        }
    }

    mod readiness {
        use super::*;

        #[test]
        fn parses_embedded_json() {
            let r = Readiness::parse("Sure! {\"readiness_score\": 0.85, \"reason\": \"clear\"} thanks");
            assert_eq!(r.score, 0.85);
            assert_eq!(r.reason, "clear");
        }

        #[test]
        fn missing_score_is_zero() {
            let r = Readiness::parse("{\"reason\": \"vague\"}");
            assert_eq!(r.score, 0.0);
        }

        #[test]
        fn unparsable_is_neutral() {
            assert_eq!(Readiness::parse("no json here"), Readiness::parsing_failed());
            assert_eq!(Readiness::parse("{not json}"), Readiness::parsing_failed());
        }

        #[test]
        fn assessment_call_quotes_question_and_answer() {
            let call = Readiness::assessment_call("Q?", "A.");
            assert_eq!(call.user_message, "Question: \"Q?\"\nAnswer: \"A.\"");
            assert!(call.system_instruction.contains("readiness_score"));
        }

        #[tokio::test]
        async fn model_failure_gives_errored_readiness() {
            let model = MockLanguageModel::new().with_unavailable("down");
            let analyzer = SignalAnalyzer::new(Arc::new(model));
            let r = analyzer.assess_readiness("q", "a").await;
            assert_eq!(r, Readiness::errored());
        }

        #[tokio::test]
        async fn analyze_blends_readiness_into_completeness() {
            let model = MockLanguageModel::new()
                .with_response("{\"readiness_score\": 1.0, \"reason\": \"great\"}");
            let analyzer = SignalAnalyzer::new(Arc::new(model));
            let signals = analyzer.analyze("stuff", Some(Q0)).await;
            let base = TextSignals::analyze("stuff", Some(Q0)).base_completeness;
            assert!((signals.completeness_score - (base * 0.7 + 0.3)).abs() < 1e-9);
            assert_eq!(signals.readiness_score, 1.0);
        }
    }

    proptest! {
        #[test]
        fn scores_stay_in_unit_range(answer in "[a-zA-Z0-9 ,.?']{0,200}") {
            let s = TextSignals::analyze(&answer, Some(Q0));
            prop_assert!((0.0..=1.0).contains(&s.specificity_score));
            prop_assert!((0.0..=1.0).contains(&s.relevance_score));
            prop_assert!((0.0..=1.0).contains(&s.base_completeness));
        }
    }
}
