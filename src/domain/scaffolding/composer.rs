//! Reply composer: turns an action into model instructions and cleans up
//! what comes back.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::session::text::{first_sentence, word_count};
use crate::domain::session::SessionMemory;
use crate::ports::ModelCall;

use super::phrases::PhrasePicker;
use super::policy::Action;

/// Output token cap for nudge replies.
pub const NUDGE_MAX_OUTPUT_TOKENS: u32 = 100;

/// Sentences this short (in characters) are dropped by the output filter.
const MIN_SENTENCE_CHARS: usize = 10;

const PEER_MENTOR_SYSTEM: &str = "You are a supportive peer mentor assistant for Ghanaian students. Prioritize student-led conversation. Follow any runtime instructions provided in the 'micro_instruction' field. Be brief, clear, non-judgemental, warm, and use neutral Ghanaian English (e.g., reference shared values like community unity or resilience across Ghana's diverse groups). Do not use specific ethnic languages or references. Do not invent facts. Always stay on the current question; do not jump to later topics like solutions, causes, or efforts.";

const REPHRASE_SYSTEM: &str = "You are a warm, supportive mentor for Ghanaian students. Rephrase this question to provide context and meaning, weaving in the student's recent thought warmly without answering it or adding facts. Keep neutral Ghanaian English, evoke emotions/values, end with a question. Max 25 words.";

const BASE_INSTRUCTION: &str = "Do not invent facts or give external data.";

const NO_INTERVENE: &str = "Student asked a question. Do not intervene. Only reply with a brief encouragement if necessary (e.g., 'Good question.').";

const MINIMAL_VALIDATION: &str = "Provide a very short validation/acknowledgement using the student's words. <= 8 words. Do not ask any questions.";

const RE_ANCHOR: &str = "Re-anchor to the earlier question or topic by restating it briefly in a neutral Ghanaian community context (e.g., tying to shared values like unity or resilience across Ghana). Then ask a single question linking the student's response back to the core curiosity or problem. Keep it warm and student-centered. Two short lines max.";

const CLARIFY_VARIANTS: &[&str] = &[
    "Ask one concise clarifying question focused on what's unclear. Start with 'That's an interesting point, can you tell me more about...'",
    "Help the user go deeper. Ask a 'what' or 'how' question about their last statement.",
    "Ask for a specific example. Start with 'I see. Could you give me an example of what you mean?'",
    "Encourage them to elaborate on one part of their answer. e.g., 'You mentioned [topic], could you expand on that a bit?'",
];

const EXPAND_VARIANTS: &[&str] = &[
    "Invite the student to give one specific example. Ask one open question only.",
    "Gently ask for more detail. e.g., 'That's a good start. What else comes to mind?'",
    "Ask an open-ended question to get them to add more. e.g., 'And what does that look like in your community?'",
];

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("sentence pattern is valid"));

/// Expected shape of the model's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    OneLineValidation,
    TwoLinesReanchor,
    SingleQuestion,
}

/// Rolling context passed along with the instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    pub topic_focus: Option<String>,
    pub focus_points: Vec<String>,
}

/// Instruction payload for one nudge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicroInstruction {
    pub runtime_instruction: String,
    pub context_anchor: String,
    pub memory_snapshot: MemorySnapshot,
    pub student_message: String,
    pub output_format: OutputFormat,
    pub max_words: usize,
}

impl MicroInstruction {
    /// The model call that carries this instruction.
    pub fn to_model_call(&self) -> ModelCall {
        let payload = serde_json::to_string(self).unwrap_or_default();
        ModelCall::new(
            format!("{}\n\nMicro-instruction: {}", PEER_MENTOR_SYSTEM, payload),
            format!("Student: {}", self.student_message),
        )
        .with_max_output_tokens(NUDGE_MAX_OUTPUT_TOKENS)
    }
}

/// Word budget for each action.
pub fn max_words_for(action: Action) -> usize {
    match action {
        Action::MinimalValidation => 8,
        Action::InviteExpand => 15,
        Action::ReAnchor => 30,
        Action::Clarify | Action::NoIntervene => 25,
    }
}

fn output_format_for(action: Action) -> OutputFormat {
    match action {
        Action::MinimalValidation | Action::NoIntervene => OutputFormat::OneLineValidation,
        Action::ReAnchor => OutputFormat::TwoLinesReanchor,
        Action::InviteExpand | Action::Clarify => OutputFormat::SingleQuestion,
    }
}

/// Builds the micro-instruction for `action`.
pub fn compose(
    action: Action,
    student_message: &str,
    memory: &SessionMemory,
    current_question: Option<&str>,
    picker: &dyn PhrasePicker,
) -> MicroInstruction {
    let action_instruction = match action {
        Action::NoIntervene => NO_INTERVENE,
        Action::MinimalValidation => MINIMAL_VALIDATION,
        Action::ReAnchor => RE_ANCHOR,
        Action::Clarify => picker.choose(CLARIFY_VARIANTS),
        Action::InviteExpand => picker.choose(EXPAND_VARIANTS),
    };

    let context_anchor = current_question
        .map(str::to_string)
        .or_else(|| memory.topic_focus.clone())
        .unwrap_or_else(|| "No explicit question".to_string());

    MicroInstruction {
        runtime_instruction: format!("{} {}", BASE_INSTRUCTION, action_instruction),
        context_anchor,
        memory_snapshot: MemorySnapshot {
            topic_focus: memory.topic_focus.clone(),
            focus_points: memory.latest_focus_points(3),
        },
        student_message: student_message.to_string(),
        output_format: output_format_for(action),
        max_words: max_words_for(action),
    }
}

/// Asks the model to rephrase the question around the student's thought.
pub fn rephrase_call(current_question: &str, student_message: &str) -> ModelCall {
    ModelCall::new(
        REPHRASE_SYSTEM,
        format!(
            "Original Question: \"{}\"\nStudent's Recent Thought: \"{}\"\nRephrase to guide gently.",
            current_question, student_message
        ),
    )
}

/// Deterministic nudge used when the model cannot be reached.
pub fn fallback_rephrase(student_message: &str) -> String {
    format!(
        "Building on your insight about {}, how does this connect to your personal values or emotions in your community?",
        first_sentence(student_message)
    )
}

/// Keeps whole sentences while they fit in `max_words`.
///
/// Newlines are flattened and fragments of ten characters or fewer are
/// dropped. If nothing fits, the first `max_words` words are used. The
/// result always ends in `.`, `!` or `?`.
pub fn filter_output(text: &str, max_words: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut kept: Vec<&str> = Vec::new();
    let mut words = 0;
    for sentence in SENTENCE
        .find_iter(&cleaned)
        .map(|m| m.as_str().trim())
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
    {
        let sentence_words = word_count(sentence);
        if words + sentence_words > max_words {
            break;
        }
        kept.push(sentence);
        words += sentence_words;
    }

    let mut filtered = if kept.is_empty() {
        cleaned
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        kept.join(" ")
    };

    if !filtered.ends_with(['.', '!', '?']) {
        filtered.push('?');
    }
    filtered
}
