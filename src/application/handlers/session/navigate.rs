//! NavigateHandler - Command handler for the onboarding Next and Back buttons.

use std::sync::Arc;
use thiserror::Error;

use crate::application::{SessionRegistry, SessionStoreAdapter};
use crate::domain::conversation::{ConversationMachine, TurnError, TurnOutcome};
use crate::domain::foundation::{ErrorCode, UserId};

use super::SessionTurn;

/// Which onboarding button was pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Next, with the name field when on the name screen.
    Next { name: Option<String> },
    Back,
}

/// Command to move between onboarding screens.
#[derive(Debug, Clone)]
pub struct NavigateCommand {
    pub user_id: UserId,
    pub navigation: Navigation,
}

/// Errors for onboarding navigation. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    #[error(transparent)]
    Rejected(#[from] TurnError),
}

impl NavigateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NavigateError::Rejected(err) => err.code(),
        }
    }
}

/// Handler for onboarding navigation.
pub struct NavigateHandler {
    machine: Arc<ConversationMachine>,
    store: Arc<SessionStoreAdapter>,
    registry: SessionRegistry,
}

impl NavigateHandler {
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

    pub async fn handle(&self, cmd: NavigateCommand) -> Result<SessionTurn, NavigateError> {
        let _guard = self.registry.acquire(&cmd.user_id).await;
        let mut state = self.store.load(&cmd.user_id).await;

        let outcome = match &cmd.navigation {
            Navigation::Next { name } => self.machine.press_next(&mut state, name.as_deref())?,
            Navigation::Back => {
                self.machine.press_back(&mut state)?;
                TurnOutcome::default()
            }
        };

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

    fn handler(harness: &Harness) -> NavigateHandler {
        NavigateHandler::new(
            harness.machine.clone(),
            harness.store.clone(),
            harness.registry.clone(),
        )
    }

    fn next(name: Option<&str>) -> NavigateCommand {
        NavigateCommand {
            user_id: Harness::user(),
            navigation: Navigation::Next {
                name: name.map(str::to_string),
            },
        }
    }

    fn back() -> NavigateCommand {
        NavigateCommand {
            user_id: Harness::user(),
            navigation: Navigation::Back,
        }
    }

    #[tokio::test]
    async fn short_name_is_rejected_and_nothing_saved() {
        let harness = Harness::new(MockLanguageModel::new());

        let err = handler(&harness).handle(next(Some(" K "))).await.unwrap_err();

        assert_eq!(err, NavigateError::Rejected(TurnError::NameRequired));
        assert_eq!(err.code(), ErrorCode::TooShort);
        assert_eq!(err.to_string(), "Please enter your first name.");
        assert_eq!(harness.documents.document_count().await, 0);
    }

    #[tokio::test]
    async fn walks_onboarding_into_the_greeting() {
        let harness = Harness::new(MockLanguageModel::new());
        let handler = handler(&harness);

        let turn = handler.handle(next(Some("Kwame"))).await.unwrap();
        assert_eq!(turn.session.step_index, -3);
        assert_eq!(turn.session.student_name.as_deref(), Some("Kwame"));

        handler.handle(next(None)).await.unwrap();
        handler.handle(next(None)).await.unwrap();
        let turn = handler.handle(next(None)).await.unwrap();

        assert_eq!(turn.session.step_index, 0);
        assert_eq!(turn.emitted_texts(), vec!["Good morning, Kwame."]);
    }

    #[tokio::test]
    async fn back_steps_toward_name_screen() {
        let harness = Harness::new(MockLanguageModel::new());
        let mut state = SessionState::new("Ama");
        state.step = Step::from_index(-2).unwrap();
        harness.seed(&state).await;

        let turn = handler(&harness).handle(back()).await.unwrap();

        assert_eq!(turn.session.step_index, -3);
        assert!(turn.emitted.is_empty());
    }

    #[tokio::test]
    async fn back_at_first_screen_is_rejected() {
        let harness = Harness::new(MockLanguageModel::new());

        let err = handler(&harness).handle(back()).await.unwrap_err();

        assert_eq!(err, NavigateError::Rejected(TurnError::AtFirstScreen));
    }

    #[tokio::test]
    async fn navigation_is_rejected_in_chat_mode() {
        let harness = Harness::new(MockLanguageModel::new());
        let mut state = SessionState::new("Ama");
        state.step = Step::question(0);
        harness.seed(&state).await;

        let err = handler(&harness).handle(next(None)).await.unwrap_err();

        assert_eq!(err, NavigateError::Rejected(TurnError::NotOnboarding));
        assert_eq!(err.code(), ErrorCode::InvalidNavigation);
    }
}
