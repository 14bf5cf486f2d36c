//! Scripted mentor lines and the prompts sent to the language model.

use std::collections::BTreeMap;

use crate::domain::interview::{question, Phase, Question};
use crate::domain::session::{Message, FIRST_QUESTION_INDEX};
use crate::ports::ModelCall;

// ════════════════════════════════════════════════════════════════════════════════
// Scripted lines
// ════════════════════════════════════════════════════════════════════════════════

pub const OPENING_QUESTION: &str = "Okay, let's begin. What's that first problem or challenge you've noticed in your community, school, home, or Ghana that makes you say 'damm, this issue must be solved'? (And you can just type **'hint'** if you're stuck).";
pub const SKILLS_PROMPT: &str = "You've finished all the questions! Now, let's move to Step 2. What are 3-5 of your core skills or passions? You can just list them.";
pub const SKILLS_RECEIVED: &str = "Thanks! I've noted your skills.";
pub const PATH_COMPLETED: &str = "You've completed this part of the path!";
pub const VALIDATION_INTRO: &str =
    "Great, you've defined the core problem. Here's a summary of your thoughts:";
pub const APPROVE_OR_REFINE: &str = "Does that capture your idea correctly? Please type **'approve'** to continue, or **'refine'** to go back and change it.";
pub const ASK_REFINE_TARGET: &str = "No problem. Which part would you like to refine: the **'what'**, the **'who'**, or the **'why'**?";
pub const APPROVED: &str = "Excellent. Let's move on to Phase 1C and find your role in this.";
pub const REFINE_ACK: &str = "Okay, let's look at that again.";
pub const REFINE_NOT_UNDERSTOOD: &str =
    "Sorry, I didn't catch that. Please type 'what', 'who', or 'why'.";
pub const ASK_WHAT_IS_UNSURE: &str =
    "No problem at all. Is there anything you're still unsure about?";
pub const NO_PRESSURE: &str = "That's understandable. This session is all about exploring your own ideas, so there's no pressure. It's just a space for you to think.";
pub const CAN_WE_START: &str = "Can we start now?";
pub const OFFER_REWATCH: &str =
    "That's alright. Feel free to re-watch again. I'll be here when you're ready.";
pub const YOUR_JOURNEY: &str = "That's completely okay. This is your journey. Remember, this first step is just about being curious. There are no right or wrong answers.";
pub const SHALL_WE_TRY: &str = "We can start whenever you're ready. Shall we try?";
pub const LAST_QUESTION_ACK: &str = "Got it. That's a very clear point.";
pub const CONVERSATION_FALLBACK: &str = "I see. Shall we continue?";
pub const TRANSITION_FALLBACK: &str = "That's a great point.";
pub const TRANSITION_ERROR_FALLBACK: &str = "That's a very clear point.";
pub const PROFILE_FAILED: &str =
    "Sorry, I had trouble generating your profile. Let's move on for now.";
pub const NEXT_STEP_TEASER: &str = "Next, we'll look at Step 4: Academic Reality...";

/// Encouraging lines used when the ready-check reply cannot be generated.
pub const DYNAMIC_CONFIRMATIONS: &[&str] = &[
    "That's amazing. Personally, I think that's the first step to finding a problem you care about. Don't you also think same?",
    "Exactly. Taking a moment to set our focus is the best way to start. It really helps to clear your mind, doesn't it?",
    "I agree. It's important to be in the right mindset first. This is the foundation for all the great ideas to come, don't you think?",
];

const POSITIVE_REPLIES: &[&str] = &[
    "yes", "yep", "ya", "sure", "ok", "okay", "ready", "i am", "i think so", "continue",
];

/// True when the reply contains any affirmative word or phrase.
pub fn is_positive_reply(text: &str) -> bool {
    let lower = text.to_lowercase();
    POSITIVE_REPLIES.iter().any(|w| lower.contains(w))
}

/// Time-of-day greeting for a local hour.
pub fn time_greeting(hour: u32) -> &'static str {
    match hour {
        h if h < 12 => "Good morning",
        h if h < 18 => "Good afternoon",
        _ => "Good evening",
    }
}

pub fn first_time_greeting(greeting: &str, name: &str) -> String {
    format!("{}, {}.", greeting, name)
}

pub fn rewatch_greeting(name: &str) -> String {
    format!("Welcome back, {}. I believe you are ready now?", name)
}

pub fn returning_user_greeting(name: &str, topic: &str) -> String {
    format!(
        "Welcome back, {}! Last time, we started talking about {}. Let's build on that thought.",
        name, topic
    )
}

/// Prompt shown when a side dialog hands back to the ready check.
pub fn ready_prompt() -> String {
    let flow = Phase::Discovery
        .intro()
        .facilitator_flow
        .unwrap_or_default();
    format!("Great. {} Are you ready?", flow)
}

pub fn hint_reply(question: &Question) -> String {
    format!("No problem. {}", question.help_text)
}

/// How a question is asked. The first question has its own opener.
pub fn question_prompt(slot: usize, question: &Question) -> String {
    if slot == 0 {
        OPENING_QUESTION.to_string()
    } else {
        format!(
            "{} (And as always, just type **'hint'** if you need it!)",
            question.title
        )
    }
}

/// Line shown before the first question of a later phase.
pub fn phase_intro_line(phase: Phase) -> Option<String> {
    match phase {
        Phase::Discovery => None,
        Phase::Defining => Some(format!(
            "Great, that's Phase 1A done. Now for Phase 1B: {}",
            phase.intro().purpose
        )),
        Phase::PurposeAnchors => Some(format!(
            "Excellent. Let's move to Phase 1C: {}",
            phase.intro().purpose
        )),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Greeting small talk
// ════════════════════════════════════════════════════════════════════════════════

pub fn opening_goal(greeting: &str, user_input: &str) -> String {
    let mut context = format!("You said '{}'. The user replied '{}'.", greeting, user_input);
    if greeting.to_lowercase().contains("afternoon") && user_input.to_lowercase().contains("morning") {
        context.push_str(" (They got the time wrong, make a friendly joke about it).");
    }
    format!(
        "{} Acknowledge their greeting, then ask them if they found the SDG videos insightful (e.g., 'I see you've just finished... isn't it?').",
        context
    )
}

pub fn sdg_reaction_goal(user_input: &str) -> String {
    format!(
        "You asked '...isn't it?'. The user replied '{}'. Acknowledge their reply (e.g., \"I understand\" or \"That's great!\"), and then ask if they are ready to continue or rewatch. (e.g., \"Are you ready to continue... or would you like to re-watch...?\")",
        user_input
    )
}

pub const CONTINUE_GOAL: &str = "The user is ready to continue. Respond with encouragement and ask them if they are ready for the first phase. (e.g., 'Great. So, to start... are you ready?').";
pub const READY_GOAL: &str = "The user is ready. Give them one last dynamic, encouraging phrase (e.g., 'That's the first step... don't you think?').";
pub const NOT_READY_GOAL: &str =
    "The user said they are not ready. Be empathetic. Ask them what's on their mind.";

/// Persona call for the scripted greeting beats.
pub fn conversational_call(
    mentor_name: &str,
    student_name: &str,
    history: &[Message],
    user_input: &str,
    goal: &str,
) -> ModelCall {
    let system = format!(
        "You are {mentor}, a warm, empathetic, and human-like mentor for a Ghanaian student named {student}.
You are currently in the *welcome phase* of a chat. Your goal is to be natural, listen, and make them feel comfortable before the 'real' questions begin.

**RULES:**
1.  **Be Brief:** Use 1-2 short sentences.
2.  **Be Human:** Be conversational, not robotic. Use light, appropriate emoji (like 😉 or 😊) if it feels natural.
3.  **Listen (7Cs):** **Always** respond directly to what the user just said. Be Clear, Concise, and Courteous.
4.  **Sentiment Mirroring:** Reflect the user's emotional tone. If they are tired, acknowledge it. If they are excited, share that.
5.  **No 'But':** Use constructive feedback. Instead of \"That's good, but...\", say \"That's a great point, and we can...\"
6.  **Fallback:** If the user's response is unclear (e.g., \"askjdf\"), gently ask for clarification (e.g., \"Sorry, I didn't quite catch that.\")
7.  **One Turn At A Time:** Your response MUST NOT combine multiple steps. Just achieve the current goal and STOP.
8.  **Follow the Goal:** Your reply MUST achieve the \"CURRENT GOAL\".

**Context:**
- The last 3 messages (if any) will be provided.
- You are leading the user to the first question of Phase 1.

**CURRENT GOAL:** {goal}
",
        mentor = mentor_name,
        student = student_name,
        goal = goal,
    );

    let context = history
        .iter()
        .map(|m| format!("{}: {}", m.sender, m.plain_text))
        .collect::<Vec<_>>()
        .join("\n");

    ModelCall::new(
        system,
        format!(
            "**Conversation History:**\n{}\n\n**User's last message:** \"{}\"",
            context, user_input
        ),
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Transitions and summaries
// ════════════════════════════════════════════════════════════════════════════════

const TRANSITION_SYSTEM: &str = "You are a supportive peer mentor for Ghanaian students. Your task is to provide a brief, natural, and validating acknowledgement of the student's previous answer.
  1. Briefly and warmly acknowledge their answer.
  2. You can paraphrase their key insight in one short sentence to show you understood.
  3. **DO NOT** ask the next question. Just provide the acknowledgement.
  Use neutral Ghanaian English. Be very concise (max 1-2 short sentences total). Do not use markdown.";

const SUMMARY_SYSTEM: &str = "You are a supportive mentor. Your output must be a single, validating summary paragraph (max 2-3 sentences). Your tone must be validating and smooth. Do not add any intro or outro text like \"Here is the summary:\".";

pub fn transition_call(previous_answer: &str) -> ModelCall {
    ModelCall::new(
        TRANSITION_SYSTEM,
        format!("Previous Answer: \"{}\"", previous_answer),
    )
}

/// Discovery and Defining answers, one labelled line each, in step order.
pub fn summary_data_points(answers: &BTreeMap<i32, String>) -> Vec<String> {
    answers
        .iter()
        .filter(|(_, answer)| !answer.trim().is_empty())
        .filter_map(|(&step, answer)| {
            let slot = usize::try_from(step - FIRST_QUESTION_INDEX).ok()?;
            let q = question(slot)?;
            matches!(q.phase, Phase::Discovery | Phase::Defining)
                .then(|| format!("{}: {}", q.summary_label(), answer))
        })
        .collect()
}

pub fn validation_summary_call(answers: &BTreeMap<i32, String>) -> ModelCall {
    let data_points = summary_data_points(answers).join("\n");
    ModelCall::new(
        SUMMARY_SYSTEM,
        format!(
            "Summarize the student's problem into ONE concise, validating summary (max 2-3 sentences).
The summary must integrate the following data points into a clear narrative:
{}
Example: \"In the Oforikrom area, many young graduates face joblessness due to limited access to practical training. This situation affects income stability and community growth. Addressing it could empower local youth and reduce underemployment.\"
Respond only with the summary text.",
            data_points
        ),
    )
}
