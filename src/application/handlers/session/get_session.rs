//! GetSessionHandler - Query handler for the current session view.

use std::sync::Arc;

use crate::application::SessionStoreAdapter;
use crate::domain::foundation::UserId;

use super::SessionView;

/// Query for a student's session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub user_id: UserId,
}

/// Handler for reading sessions. Never writes; a student with no stored
/// session sees a fresh one.
pub struct GetSessionHandler {
    store: Arc<SessionStoreAdapter>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<SessionStoreAdapter>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> SessionView {
        let state = self.store.load(&query.user_id).await;
        SessionView::from(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use crate::domain::session::{ConversationMode, SessionState, Step};

    #[tokio::test]
    async fn returns_stored_session() {
        let harness = Harness::new(MockLanguageModel::new());
        let mut state = SessionState::new("Kofi");
        state.step = Step::question(1);
        state.current_question_text = Some("What have you noticed?".to_string());
        harness.seed(&state).await;

        let view = GetSessionHandler::new(harness.store.clone())
            .handle(GetSessionQuery {
                user_id: Harness::user(),
            })
            .await;

        assert_eq!(view.step_index, 6);
        assert_eq!(view.mode, ConversationMode::Questioning);
        assert_eq!(view.mentor_name, "Kofi");
    }

    #[tokio::test]
    async fn unknown_student_is_not_persisted() {
        let harness = Harness::new(MockLanguageModel::new());

        let view = GetSessionHandler::new(harness.store.clone())
            .handle(GetSessionQuery {
                user_id: Harness::user(),
            })
            .await;

        assert_eq!(view.mode, ConversationMode::Onboarding);
        assert_eq!(harness.documents.document_count().await, 0);
    }
}
