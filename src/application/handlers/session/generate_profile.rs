//! GenerateProfileHandler - Command handler for the purpose profile.

use std::sync::Arc;
use thiserror::Error;

use crate::application::{SessionRegistry, SessionStoreAdapter};
use crate::domain::conversation::{ConversationMachine, TurnError};
use crate::domain::foundation::{ErrorCode, UserId};

use super::SessionTurn;

/// Command to generate a student's purpose profile.
#[derive(Debug, Clone)]
pub struct GenerateProfileCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateProfileError {
    #[error(transparent)]
    Rejected(#[from] TurnError),
}

impl GenerateProfileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateProfileError::Rejected(err) => err.code(),
        }
    }
}

/// Handler for purpose profile generation.
pub struct GenerateProfileHandler {
    machine: Arc<ConversationMachine>,
    store: Arc<SessionStoreAdapter>,
    registry: SessionRegistry,
}

impl GenerateProfileHandler {
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
        cmd: GenerateProfileCommand,
    ) -> Result<SessionTurn, GenerateProfileError> {
        let _guard = self.registry.acquire(&cmd.user_id).await;
        let mut state = self.store.load(&cmd.user_id).await;

        let outcome = self.machine.generate_profile(&mut state).await?;

        self.store.save(&cmd.user_id, &state).await;
        Ok(SessionTurn::new(outcome, &state))
    }
}
