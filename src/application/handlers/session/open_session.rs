//! OpenSessionHandler - Command handler run when the chat page loads.

use std::sync::Arc;
use tracing::info;

use crate::application::{restart_interrupted_onboarding, SessionRegistry, SessionStoreAdapter};
use crate::domain::conversation::ConversationMachine;
use crate::domain::foundation::UserId;

use super::SessionTurn;

/// Command to open (or resume) a student's session.
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub user_id: UserId,
}

/// Handler for opening sessions.
///
/// A session left mid-onboarding restarts at the name screen. A session in
/// chat mode gets its entry messages: a welcome back, the opening greeting,
/// or the current prompt again.
pub struct OpenSessionHandler {
    machine: Arc<ConversationMachine>,
    store: Arc<SessionStoreAdapter>,
    registry: SessionRegistry,
}

impl OpenSessionHandler {
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

    pub async fn handle(&self, cmd: OpenSessionCommand) -> SessionTurn {
        let _guard = self.registry.acquire(&cmd.user_id).await;
        let mut state = self.store.load(&cmd.user_id).await;

        if restart_interrupted_onboarding(&mut state) {
            info!(user_id = %cmd.user_id, "Interrupted onboarding restarted");
        }
        let outcome = self.machine.open(&mut state);

        self.store.save(&cmd.user_id, &state).await;
        SessionTurn::new(outcome, &state)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use crate::domain::session::{SessionState, Step};

    fn handler(harness: &Harness) -> OpenSessionHandler {
        OpenSessionHandler::new(
            harness.machine.clone(),
            harness.store.clone(),
            harness.registry.clone(),
        )
    }

    fn cmd() -> OpenSessionCommand {
        OpenSessionCommand {
            user_id: Harness::user(),
        }
    }

    #[tokio::test]
    async fn new_student_lands_on_name_screen_and_is_saved() {
        let harness = Harness::new(MockLanguageModel::new());

        let turn = handler(&harness).handle(cmd()).await;

        assert_eq!(turn.session.step_index, -4);
        assert!(turn.emitted.is_empty());
        assert_eq!(harness.documents.document_count().await, 1);
    }

    #[tokio::test]
    async fn mentor_name_is_stable_across_opens() {
        let harness = Harness::new(MockLanguageModel::new());

        let first = handler(&harness).handle(cmd()).await;
        let second = handler(&harness).handle(cmd()).await;

        assert_eq!(first.session.mentor_name, second.session.mentor_name);
    }

    #[tokio::test]
    async fn interrupted_onboarding_restarts() {
        let harness = Harness::new(MockLanguageModel::new());
        let mut state = SessionState::new("Ama");
        state.step = Step::from_index(-1).unwrap();
        harness.seed(&state).await;

        let turn = handler(&harness).handle(cmd()).await;

        assert_eq!(turn.session.step_index, -4);
    }

    #[tokio::test]
    async fn chat_session_with_empty_log_gets_greeting() {
        let harness = Harness::new(MockLanguageModel::new());
        let mut state = SessionState::new("Ama");
        state.step = Step::from_index(0).unwrap();
        state.student_name = Some("Kwame".to_string());
        harness.seed(&state).await;

        let turn = handler(&harness).handle(cmd()).await;

        assert_eq!(turn.emitted_texts(), vec!["Good morning, Kwame."]);
        assert_eq!(turn.session.messages.len(), 1);
    }

    #[tokio::test]
    async fn returning_student_is_welcomed_back() {
        let harness = Harness::new(MockLanguageModel::new());
        let mut state = SessionState::new("Ama");
        state.step = Step::question(3);
        state.student_name = Some("Kwame".to_string());
        state.previous_topic_summary = Some("plastic waste".to_string());
        state.message_log.append("Ama", "Earlier", None).unwrap();
        harness.seed(&state).await;

        let turn = handler(&harness).handle(cmd()).await;

        assert_eq!(turn.emitted.len(), 1);
        assert!(turn.emitted[0].raw_text.starts_with("Welcome back, Kwame!"));
        assert!(turn.emitted[0].raw_text.contains("plastic waste"));
    }
}
