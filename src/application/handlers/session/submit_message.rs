//! SubmitMessageHandler - Command handler for the chat input box.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::{SessionRegistry, SessionStoreAdapter};
use crate::domain::conversation::{ConversationMachine, TurnError};
use crate::domain::foundation::{ErrorCode, UserId};

use super::SessionTurn;

/// Command to submit one chat message.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub user_id: UserId,
    pub text: String,
    /// Id of an earlier message the student is replying to.
    pub reply_to: Option<String>,
}

/// Errors for message submission. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitMessageError {
    #[error(transparent)]
    Rejected(#[from] TurnError),
}

impl SubmitMessageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitMessageError::Rejected(err) => err.code(),
        }
    }
}

/// Handler for chat submissions.
///
/// Holds the student's lock across the whole turn, including any model
/// calls, so a second submission waits for this one to be saved.
pub struct SubmitMessageHandler {
    machine: Arc<ConversationMachine>,
    store: Arc<SessionStoreAdapter>,
    registry: SessionRegistry,
}

impl SubmitMessageHandler {
    pub fn new(
        machine: Arc<ConversationMachine>,
        store: Arc<SessionStoreAdapter>,
        registry: SessionRegistry,
    ) -> Self {
        Self {
            machine,
            store,
            registry,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitMessageCommand,
    ) -> Result<SessionTurn, SubmitMessageError> {
        let _guard = self.registry.acquire(&cmd.user_id).await;
        let mut state = self.store.load(&cmd.user_id).await;

        let outcome = self
            .machine
            .submit(&mut state, &cmd.text, cmd.reply_to.as_deref())
            .await?;
        debug!(
            user_id = %cmd.user_id,
            emitted = outcome.messages.len(),
            step = state.step.index(),
            "Message handled"
        );

        self.store.save(&cmd.user_id, &state).await;
        Ok(SessionTurn::new(outcome, &state))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use crate::domain::session::{SessionState, Step};
    use std::time::Duration;

    fn handler(harness: &Harness) -> SubmitMessageHandler {
        SubmitMessageHandler::new(
            harness.machine.clone(),
            harness.store.clone(),
            harness.registry.clone(),
        )
    }

    fn submit(text: &str) -> SubmitMessageCommand {
        SubmitMessageCommand {
            user_id: Harness::user(),
            text: text.to_string(),
            reply_to: None,
        }
    }

    fn chat_state(step: Step) -> SessionState {
        let mut state = SessionState::new("Ama");
        state.step = step;
        state.student_name = Some("Kwame".to_string());
        state
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let harness = Harness::new(MockLanguageModel::new());
        harness.seed(&chat_state(Step::question(0))).await;

        let err = handler(&harness).handle(submit("   ")).await.unwrap_err();

        assert_eq!(err, SubmitMessageError::Rejected(TurnError::EmptyMessage));
        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[tokio::test]
    async fn onboarding_session_cannot_chat() {
        let harness = Harness::new(MockLanguageModel::new());

        let err = handler(&harness).handle(submit("hello")).await.unwrap_err();

        assert_eq!(
            err,
            SubmitMessageError::Rejected(TurnError::OnboardingInProgress)
        );
    }

    #[tokio::test]
    async fn greeting_turn_is_persisted() {
        let harness = Harness::new(MockLanguageModel::new().with_response("Lovely to meet you!"));
        harness
            .seed(&chat_state(Step::from_index(0).unwrap()))
            .await;

        let turn = handler(&harness).handle(submit("Good morning")).await.unwrap();

        assert_eq!(turn.emitted_texts(), vec!["Good morning", "Lovely to meet you!"]);
        let saved = harness.store.load(&Harness::user()).await;
        assert_eq!(saved.step.index(), 1);
        assert_eq!(saved.message_log.len(), 2);
    }

    #[tokio::test]
    async fn skills_answer_completes_the_path() {
        let harness = Harness::new(MockLanguageModel::new());
        harness.seed(&chat_state(Step::SkillsPrompt)).await;

        let turn = handler(&harness)
            .handle(submit("I love drawing and organizing people"))
            .await
            .unwrap();

        assert_eq!(turn.session.step_index, 29);
        assert!(turn
            .emitted_texts()
            .contains(&"Thanks! I've noted your skills."));

        let err = handler(&harness).handle(submit("more")).await.unwrap_err();
        assert_eq!(err, SubmitMessageError::Rejected(TurnError::PathCompleted));
    }

    #[tokio::test]
    async fn concurrent_submissions_for_one_student_are_serialized() {
        let model = MockLanguageModel::new()
            .with_default_response("That sounds wonderful, tell me more!")
            .with_delay(Duration::from_millis(20));
        let harness = Harness::new(model);
        harness
            .seed(&chat_state(Step::from_index(0).unwrap()))
            .await;
        let handler = Arc::new(handler(&harness));

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(submit("Hello there")).await })
        };
        let second = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(submit("It was inspiring")).await })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let saved = harness.store.load(&Harness::user()).await;
        assert_eq!(saved.step.index(), 2);
        assert_eq!(saved.message_log.len(), 4);
    }
}
