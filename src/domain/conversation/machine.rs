//! Step-driven conversation controller.
//!
//! Each user action (pressing Next/Back during onboarding, submitting a
//! message, opening the chat, asking for the profile) is applied to a
//! [`SessionState`] in place. The machine returns the mentor and student
//! messages appended during the turn.
//!
//! Model calls never abort a turn: every call site has a deterministic
//! fallback, so the only errors are rejected user actions.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::profile::{profile_call, PurposeProfile};
use super::prompts::*;
use crate::domain::foundation::ErrorCode;
use crate::domain::interview::{
    first_slot_of, last_slot_of, question, Phase, Question, RefineTarget, QUESTION_COUNT,
};
use crate::domain::scaffolding::{
    compose, fallback_rephrase, filter_output, rephrase_call, Action, InterventionPolicy,
    PhrasePicker, SignalAnalyzer,
};
use crate::domain::session::{
    text::summarize_short, GreetingBeat, Message, OnboardingScreen, ReplyRef, SessionState,
    SideState, Step,
};
use crate::ports::{is_useful_response, Clock, LanguageModel, ModelCall};

/// Minimum length of the student's first name.
pub const MIN_NAME_CHARS: usize = 2;

/// Turns of history given to the greeting persona.
const GREETING_HISTORY: usize = 3;

/// Word budget for a model rephrase used after a failed nudge.
const REPHRASE_MAX_WORDS: usize = 25;

/// User actions the machine refuses. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("Message text cannot be empty")]
    EmptyMessage,

    #[error("Please enter your first name.")]
    NameRequired,

    #[error("Finish the introduction before chatting")]
    OnboardingInProgress,

    #[error("Navigation is only available during the introduction")]
    NotOnboarding,

    #[error("Already at the first screen")]
    AtFirstScreen,

    #[error("This part of the path is already complete")]
    PathCompleted,

    #[error("The purpose profile is available once the interview is complete")]
    ProfileNotReady,
}

impl TurnError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TurnError::EmptyMessage => ErrorCode::EmptyField,
            TurnError::NameRequired => ErrorCode::TooShort,
            _ => ErrorCode::InvalidNavigation,
        }
    }
}

/// Messages appended during one turn, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub messages: Vec<Message>,
}

impl TurnOutcome {
    fn since(state: &SessionState, start: usize) -> Self {
        Self {
            messages: state.message_log.since(start).to_vec(),
        }
    }

    /// Raw text of every emitted message.
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.raw_text.as_str()).collect()
    }
}

/// Drives a session through onboarding, greeting, interview, validation
/// and the purpose profile.
pub struct ConversationMachine {
    model: Arc<dyn LanguageModel>,
    analyzer: SignalAnalyzer,
    policy: InterventionPolicy,
    picker: Arc<dyn PhrasePicker>,
    clock: Arc<dyn Clock>,
}

impl ConversationMachine {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        policy: InterventionPolicy,
        picker: Arc<dyn PhrasePicker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            analyzer: SignalAnalyzer::new(model.clone()),
            model,
            policy,
            picker,
            clock,
        }
    }

    pub fn policy(&self) -> &InterventionPolicy {
        &self.policy
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Onboarding
    // ════════════════════════════════════════════════════════════════════════════

    /// Advances one onboarding screen. Leaving the last screen enters the
    /// chat and emits the opening greeting.
    pub fn press_next(
        &self,
        state: &mut SessionState,
        name: Option<&str>,
    ) -> Result<TurnOutcome, TurnError> {
        let Step::Onboarding(screen) = state.step else {
            return Err(TurnError::NotOnboarding);
        };

        if screen == OnboardingScreen::NameCapture {
            let name = name.map(str::trim).unwrap_or_default();
            if name.chars().count() < MIN_NAME_CHARS {
                return Err(TurnError::NameRequired);
            }
            state.student_name = Some(name.to_string());
        }

        let start = state.message_log.len();
        match screen.next() {
            Some(next) => state.step = Step::Onboarding(next),
            None => self.emit_opening(state),
        }
        state.touch();
        debug!(step = state.step.index(), "Onboarding advanced");
        Ok(TurnOutcome::since(state, start))
    }

    /// Goes back one onboarding screen.
    pub fn press_back(&self, state: &mut SessionState) -> Result<(), TurnError> {
        let Step::Onboarding(screen) = state.step else {
            return Err(TurnError::NotOnboarding);
        };
        let previous = screen.previous().ok_or(TurnError::AtFirstScreen)?;
        state.step = Step::Onboarding(previous);
        state.touch();
        Ok(())
    }

    /// Renders the chat entry for a loaded session. A no-op during
    /// onboarding.
    pub fn open(&self, state: &mut SessionState) -> TurnOutcome {
        if state.step.is_onboarding() {
            return TurnOutcome::default();
        }

        let start = state.message_log.len();
        let returning_topic = state
            .previous_topic_summary
            .clone()
            .filter(|_| state.step.index() >= Step::question(0).index());

        if let Some(topic) = returning_topic {
            let line = returning_user_greeting(state.student_address(), &topic);
            say(state, line, None);
        } else if state.message_log.is_empty() {
            self.emit_opening(state);
        } else {
            self.represent_current_step(state);
        }
        state.touch();
        TurnOutcome::since(state, start)
    }

    fn emit_opening(&self, state: &mut SessionState) {
        state.step = Step::Greeting(GreetingBeat::Opening);
        if state.has_rewatched_intro {
            let line = rewatch_greeting(state.student_address());
            say(state, line, None);
            state.step = Step::Side(SideState::PostRewatchCheck);
        } else {
            let greeting = time_greeting(self.clock.local_hour());
            let line = first_time_greeting(greeting, state.student_address());
            say(state, line, None);
        }
    }

    fn represent_current_step(&self, state: &mut SessionState) {
        match state.step {
            Step::Greeting(GreetingBeat::Opening) => self.emit_opening(state),
            Step::Question(_) | Step::SkillsPrompt | Step::Completed => self.present_step(state),
            Step::Side(SideState::ChooseRefineTarget) => say(state, ASK_REFINE_TARGET, None),
            _ => {}
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Submissions
    // ════════════════════════════════════════════════════════════════════════════

    /// Applies one free-text submission.
    ///
    /// The student's message is logged first, optionally quoting an earlier
    /// message. An unknown `reply_to` id is dropped with a warning.
    pub async fn submit(
        &self,
        state: &mut SessionState,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<TurnOutcome, TurnError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TurnError::EmptyMessage);
        }
        match state.step {
            Step::Onboarding(_) => return Err(TurnError::OnboardingInProgress),
            Step::Completed => return Err(TurnError::PathCompleted),
            _ => {}
        }

        let start = state.message_log.len();
        let quote = record_student_message(state, text, reply_to);

        match state.step {
            Step::Greeting(beat) => self.greeting_turn(state, beat, text).await,
            Step::Question(slot) => self.answer_turn(state, slot, text, quote.as_ref()).await,
            Step::SkillsPrompt => {
                state.store_answer(Step::SkillsPrompt.index(), text);
                say(state, SKILLS_RECEIVED, quote.as_ref());
                state.step = Step::Completed;
                self.present_step(state);
            }
            Step::Side(side) => self.side_turn(state, side, text).await,
            Step::Onboarding(_) | Step::Completed => {}
        }

        state.touch();
        debug!(step = state.step.index(), "Turn applied");
        Ok(TurnOutcome::since(state, start))
    }

    async fn greeting_turn(&self, state: &mut SessionState, beat: GreetingBeat, text: &str) {
        let lower = text.to_lowercase();
        match beat {
            GreetingBeat::Opening => {
                let greeting = time_greeting(self.clock.local_hour());
                let goal = opening_goal(greeting, text);
                self.persona_reply(state, text, &goal, CONVERSATION_FALLBACK)
                    .await;
                state.step = Step::Greeting(GreetingBeat::SdgReaction);
            }
            GreetingBeat::SdgReaction => {
                let goal = sdg_reaction_goal(text);
                self.persona_reply(state, text, &goal, CONVERSATION_FALLBACK)
                    .await;
                state.step = Step::Greeting(GreetingBeat::ContinueOrRewatch);
            }
            GreetingBeat::ContinueOrRewatch if lower.contains("rewatch") => {
                state.has_rewatched_intro = true;
                state.step = Step::Onboarding(OnboardingScreen::FinalVideo);
            }
            GreetingBeat::ContinueOrRewatch => {
                self.persona_reply(state, text, CONTINUE_GOAL, CONVERSATION_FALLBACK)
                    .await;
                state.step = Step::Greeting(GreetingBeat::ReadyCheck);
            }
            GreetingBeat::ReadyCheck if is_positive_reply(text) => {
                let fallback = self.picker.choose(DYNAMIC_CONFIRMATIONS);
                self.persona_reply(state, text, READY_GOAL, fallback).await;
                state.step = Step::Greeting(GreetingBeat::Encouragement);
            }
            GreetingBeat::ReadyCheck => {
                self.persona_reply(state, text, NOT_READY_GOAL, CONVERSATION_FALLBACK)
                    .await;
                state.step = Step::Side(SideState::NotReady);
            }
            GreetingBeat::Encouragement => {
                state.step = Step::question(0);
                self.present_step(state);
            }
        }
    }

    async fn side_turn(&self, state: &mut SessionState, side: SideState, text: &str) {
        let lower = text.to_lowercase();
        match side {
            SideState::PostRewatchCheck | SideState::StartNow if is_positive_reply(text) => {
                state.step = Step::Greeting(GreetingBeat::ReadyCheck);
                say(state, ready_prompt(), None);
            }
            SideState::PostRewatchCheck => {
                say(state, ASK_WHAT_IS_UNSURE, None);
                state.step = Step::Side(SideState::Unsure);
            }
            SideState::Unsure => {
                say(state, NO_PRESSURE, None);
                say(state, CAN_WE_START, None);
                state.step = Step::Side(SideState::StartNow);
            }
            SideState::StartNow => {
                say(state, OFFER_REWATCH, None);
                state.step = Step::Greeting(GreetingBeat::ContinueOrRewatch);
            }
            SideState::NotReady => {
                say(state, YOUR_JOURNEY, None);
                say(state, SHALL_WE_TRY, None);
                state.step = Step::Greeting(GreetingBeat::ReadyCheck);
            }
            SideState::AwaitingApproval if lower.contains("refine") => {
                state.step = Step::Side(SideState::ChooseRefineTarget);
                say(state, ASK_REFINE_TARGET, None);
            }
            SideState::AwaitingApproval => {
                say(state, APPROVED, None);
                state.step = Step::question(first_slot_of(Phase::PurposeAnchors));
                self.present_step(state);
            }
            SideState::ChooseRefineTarget => match RefineTarget::detect(text) {
                Some(target) => {
                    info!(section = ?target, "Refining defined problem");
                    state.awaiting_validation_refine = true;
                    say(state, REFINE_ACK, None);
                    state.step = Step::question(target.slot());
                    self.present_step(state);
                }
                None => {
                    state.awaiting_validation_refine = false;
                    say(state, REFINE_NOT_UNDERSTOOD, None);
                }
            },
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Interview answers
    // ════════════════════════════════════════════════════════════════════════════

    async fn answer_turn(
        &self,
        state: &mut SessionState,
        slot: usize,
        text: &str,
        quote: Option<&ReplyRef>,
    ) {
        let Some(q) = question(slot) else {
            warn!(slot, "No question at slot");
            return;
        };

        if text.to_lowercase().contains("hint") {
            say(state, hint_reply(q), quote);
            return;
        }

        if state.awaiting_validation_refine {
            state.store_answer(Step::question(slot).index(), text);
            state.awaiting_validation_refine = false;
            self.run_validation(state, quote).await;
            return;
        }

        let count = state.intervention_count(q.id);
        if self.policy.must_proceed(count) {
            info!(question = q.id, count, "Intervention ceiling reached, moving on");
        } else {
            let question_text = state
                .current_question_text
                .clone()
                .unwrap_or_else(|| q.title.to_string());
            let signals = self.analyzer.analyze(text, Some(&question_text)).await;
            let action = self.policy.decide(&signals);
            debug!(
                question = q.id,
                action = %action,
                relevance = signals.relevance_score,
                specificity = signals.specificity_score,
                completeness = signals.completeness_score,
                readiness = signals.readiness_score,
                "Answer assessed"
            );
            if self.policy.should_nudge(action, count) {
                self.nudge(state, q, &question_text, text, action, quote)
                    .await;
                return;
            }
        }

        self.accept(state, slot, text, quote).await;
    }

    async fn nudge(
        &self,
        state: &mut SessionState,
        q: &Question,
        question_text: &str,
        text: &str,
        action: Action,
        quote: Option<&ReplyRef>,
    ) {
        let micro = compose(
            action,
            text,
            &state.memory,
            Some(question_text),
            self.picker.as_ref(),
        );

        let reply = match self.model.complete(micro.to_model_call()).await {
            Ok(raw) if is_useful_response(&raw) => filter_output(&raw, micro.max_words),
            outcome => {
                if let Err(err) = outcome {
                    warn!(error = %err, action = %action, "Nudge generation failed, rephrasing");
                }
                match self.model.complete(rephrase_call(question_text, text)).await {
                    Ok(raw) if is_useful_response(&raw) => filter_output(&raw, REPHRASE_MAX_WORDS),
                    _ => fallback_rephrase(text),
                }
            }
        };

        let lens = state.memory.current_lens.clone();
        state.memory.remember(text, lens.as_deref());
        let count = state.record_intervention(q.id);
        debug!(question = q.id, count, "Nudged");
        say(state, reply, quote);
    }

    async fn accept(
        &self,
        state: &mut SessionState,
        slot: usize,
        text: &str,
        quote: Option<&ReplyRef>,
    ) {
        state.store_answer(Step::question(slot).index(), text);
        if slot == 0 {
            let topic = summarize_short(text);
            state.memory.topic_focus = Some(topic.clone());
            state.previous_topic_summary = Some(topic);
        }

        if slot == last_slot_of(Phase::Defining) {
            self.run_validation(state, quote).await;
            return;
        }

        let acknowledgement = if slot + 1 < QUESTION_COUNT {
            self.transition_acknowledgement(text).await
        } else {
            LAST_QUESTION_ACK.to_string()
        };
        say(state, acknowledgement, quote);
        state.step = Step::question(slot + 1);
        self.present_step(state);
    }

    async fn transition_acknowledgement(&self, answer: &str) -> String {
        match self.model.complete(transition_call(answer)).await {
            Ok(raw) if is_useful_response(&raw) && !raw.contains("REPHRASE") => {
                raw.trim().to_string()
            }
            Ok(_) => TRANSITION_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "Transition acknowledgement failed");
                TRANSITION_ERROR_FALLBACK.to_string()
            }
        }
    }

    async fn run_validation(&self, state: &mut SessionState, quote: Option<&ReplyRef>) {
        let summary = match self
            .model
            .complete(validation_summary_call(&state.answers))
            .await
        {
            Ok(raw) if is_useful_response(&raw) => raw.trim().to_string(),
            outcome => {
                if let Err(err) = outcome {
                    warn!(error = %err, "Validation summary failed, using stored answers");
                }
                fallback_summary(state)
            }
        };

        state.current_problem_summary = Some(summary.clone());
        say(state, VALIDATION_INTRO, quote);
        say(state, format!("\"{}\"", summary), None);
        say(state, APPROVE_OR_REFINE, None);
        state.step = Step::Side(SideState::AwaitingApproval);
    }

    /// Emits the prompt for the current step. For a question this also
    /// emits the phase intro when the question opens a later phase.
    fn present_step(&self, state: &mut SessionState) {
        match state.step {
            Step::Question(slot) => present_question(state, slot),
            Step::SkillsPrompt => say(state, SKILLS_PROMPT, None),
            Step::Completed => say(state, PATH_COMPLETED, None),
            _ => {}
        }
    }

    async fn persona_reply(&self, state: &mut SessionState, text: &str, goal: &str, fallback: &str) {
        let call = conversational_call(
            &state.mentor_name,
            state.student_address(),
            state.message_log.recent(GREETING_HISTORY),
            text,
            goal,
        );
        let reply = self.complete_or(call, fallback, "Greeting reply").await;
        say(state, reply, None);
    }

    async fn complete_or(&self, call: ModelCall, fallback: &str, what: &str) -> String {
        match self.model.complete(call).await {
            Ok(raw) if is_useful_response(&raw) => raw.trim().to_string(),
            Ok(_) => fallback.to_string(),
            Err(err) => {
                warn!(error = %err, "{} failed, using fallback", what);
                fallback.to_string()
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Purpose profile
    // ════════════════════════════════════════════════════════════════════════════

    /// Generates the purpose profile once the interview is complete.
    pub async fn generate_profile(
        &self,
        state: &mut SessionState,
    ) -> Result<TurnOutcome, TurnError> {
        if state.step != Step::Completed {
            return Err(TurnError::ProfileNotReady);
        }

        let start = state.message_log.len();
        let profile = match self.model.complete(profile_call(state)).await {
            Ok(raw) => PurposeProfile::parse(&raw),
            Err(err) => {
                warn!(error = %err, "Profile generation failed");
                None
            }
        };
        match profile {
            Some(profile) => say(state, profile.announcement(), None),
            None => say(state, PROFILE_FAILED, None),
        }
        say(state, NEXT_STEP_TEASER, None);

        state.profile_generated = true;
        state.phase_completed = Some("3".to_string());
        state.touch();
        info!("Purpose profile generated");
        Ok(TurnOutcome::since(state, start))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Log helpers
// ════════════════════════════════════════════════════════════════════════════════

/// Appends a mentor message.
fn say(state: &mut SessionState, text: impl Into<String>, quote: Option<&ReplyRef>) {
    let sender = state.mentor_name.clone();
    let text = text.into();
    if let Err(err) = state
        .message_log
        .append(sender.clone(), text.clone(), quote.cloned())
    {
        warn!(error = %err, "Mentor quote dropped");
        state.message_log.append(sender, text, None).unwrap_or_default();
    }
}

/// Appends the student's message and returns a quote of it.
fn record_student_message(
    state: &mut SessionState,
    text: &str,
    reply_to: Option<&str>,
) -> Option<ReplyRef> {
    let reply = reply_to.and_then(|id| match state.message_log.find_by_id(id) {
        Some(target) => Some(target.quote()),
        None => {
            warn!(reply_to = id, "Reply target not found, sending without quote");
            None
        }
    });
    let sender = state.student_sender().to_string();
    let id = state
        .message_log
        .append(sender.clone(), text, reply)
        .or_else(|_| state.message_log.append(sender, text, None))
        .ok()?;
    state.message_log.find_by_id(&id).map(Message::quote)
}

fn present_question(state: &mut SessionState, slot: usize) {
    let Some(q) = question(slot) else {
        return;
    };
    if slot > 0 && slot == first_slot_of(q.phase) && !state.awaiting_validation_refine {
        if let Some(intro) = phase_intro_line(q.phase) {
            say(state, intro, None);
        }
    }
    state.current_question_text = Some(q.title.to_string());
    state.open_intervention_counter(q.id);
    say(state, question_prompt(slot, q), None);
}

/// Summary built from the stored answers when the model cannot write one.
fn fallback_summary(state: &SessionState) -> String {
    let answer_to = |id: &str| {
        crate::domain::interview::question_by_id(id)
            .and_then(|q| state.answer_at(Step::question(q.slot()).index()))
            .map(summarize_short)
    };
    let parts = [
        answer_to(RefineTarget::What.question_id())
            .or_else(|| state.answer_at(Step::question(0).index()).map(summarize_short)),
        answer_to(RefineTarget::Who.question_id()).map(|who| format!("It affects {}", who)),
        answer_to(RefineTarget::Why.question_id()).map(|why| format!("It matters because {}", why)),
    ];
    let sentences = parts
        .into_iter()
        .flatten()
        .map(|s| s.trim_end_matches('.').to_string())
        .collect::<Vec<_>>();
    if sentences.is_empty() {
        "You've described a problem in your community that you care about.".to_string()
    } else {
        format!("{}.", sentences.join(". "))
    }
}
