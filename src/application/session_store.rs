//! SessionStoreAdapter - Loads and saves session state through a DocumentStore.
//!
//! Loading never fails: a missing document, an unreachable store or an
//! unreadable document all yield a fresh session. Saving is best effort and
//! only logs on failure.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::foundation::UserId;
use crate::domain::session::{SessionState, Step};
use crate::ports::{merge_documents, DocumentStore};

const STEP_FIELD: &str = "step_index";

pub struct SessionStoreAdapter {
    store: Arc<dyn DocumentStore>,
}

impl SessionStoreAdapter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Loads the session for `user_id`, merged over a fresh default so
    /// fields added since the document was written are backfilled.
    pub async fn load(&self, user_id: &UserId) -> SessionState {
        match self.store.get(user_id).await {
            Ok(Some(document)) => restore(user_id, document),
            Ok(None) => {
                info!(user_id = %user_id, "Starting new session");
                SessionState::with_random_mentor()
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Session load failed, starting fresh");
                SessionState::with_random_mentor()
            }
        }
    }

    /// Persists the whole session. Failures are logged and swallowed.
    pub async fn save(&self, user_id: &UserId, state: &SessionState) {
        let document = match serde_json::to_value(state) {
            Ok(document) => document,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Session serialization failed, not saved");
                return;
            }
        };
        if let Err(err) = self.store.upsert(user_id, document).await {
            warn!(user_id = %user_id, error = %err, "Session save failed");
        }
    }
}

/// Sends a session that was interrupted during onboarding back to the
/// name screen. Chat progress is left alone. Returns true when the step
/// changed.
pub fn restart_interrupted_onboarding(state: &mut SessionState) -> bool {
    if state.step.is_onboarding() && state.step != Step::initial() {
        state.step = Step::initial();
        return true;
    }
    false
}

fn restore(user_id: &UserId, document: Value) -> SessionState {
    let defaults = SessionState::with_random_mentor();
    if !document.is_object() {
        warn!(user_id = %user_id, "Stored session is not an object, starting fresh");
        return defaults;
    }

    let mut merged = match serde_json::to_value(&defaults) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "Default session serialization failed");
            return defaults;
        }
    };
    merge_documents(&mut merged, document);
    repair_step(user_id, &mut merged);

    match serde_json::from_value(merged) {
        Ok(state) => state,
        Err(err) => {
            warn!(user_id = %user_id, error = %err, "Stored session unreadable, starting fresh");
            defaults
        }
    }
}

/// Replaces a missing or unknown step index with the first onboarding
/// screen.
fn repair_step(user_id: &UserId, document: &mut Value) {
    let known = document
        .get(STEP_FIELD)
        .and_then(Value::as_i64)
        .and_then(|i| i32::try_from(i).ok())
        .map(|i| Step::from_index(i).is_ok())
        .unwrap_or(false);
    if known {
        return;
    }

    warn!(
        user_id = %user_id,
        step_index = ?document.get(STEP_FIELD),
        "Unknown step index, restarting onboarding"
    );
    if let Some(fields) = document.as_object_mut() {
        fields.insert(STEP_FIELD.to_string(), Value::from(Step::initial().index()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDocumentStore;
    use crate::ports::StoreError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn get(&self, _user_id: &UserId) -> Result<Option<Value>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        async fn upsert(&self, _user_id: &UserId, _document: Value) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
    }

    fn user() -> UserId {
        UserId::new("student-1").unwrap()
    }

    fn adapter_with(store: &InMemoryDocumentStore) -> SessionStoreAdapter {
        SessionStoreAdapter::new(Arc::new(store.clone()))
    }

    mod load {
        use super::*;

        #[tokio::test]
        async fn missing_document_gives_fresh_session() {
            let adapter = adapter_with(&InMemoryDocumentStore::new());

            let state = adapter.load(&user()).await;

            assert_eq!(state.step, Step::initial());
            assert!(state.message_log.is_empty());
        }

        #[tokio::test]
        async fn store_failure_gives_fresh_session() {
            let adapter = SessionStoreAdapter::new(Arc::new(FailingStore));

            let state = adapter.load(&user()).await;

            assert_eq!(state.step, Step::initial());
        }

        #[tokio::test]
        async fn old_documents_are_backfilled() {
            let store = InMemoryDocumentStore::new();
            store
                .upsert(
                    &user(),
                    json!({"step_index": 7, "mentor_name": "Yaw", "answers": {"5": "flooding"}}),
                )
                .await
                .unwrap();

            let state = adapter_with(&store).load(&user()).await;

            assert_eq!(state.step, Step::question(2));
            assert_eq!(state.mentor_name, "Yaw");
            assert_eq!(state.answer_at(5), Some("flooding"));
            assert!(state.intervention_counts.is_empty());
            assert!(!state.profile_generated);
        }

        #[tokio::test]
        async fn unknown_step_restarts_onboarding() {
            let store = InMemoryDocumentStore::new();
            store
                .upsert(&user(), json!({"step_index": 777, "student_name": "Ama"}))
                .await
                .unwrap();

            let state = adapter_with(&store).load(&user()).await;

            assert_eq!(state.step, Step::initial());
            assert_eq!(state.student_name.as_deref(), Some("Ama"));
        }

        #[tokio::test]
        async fn non_object_document_gives_fresh_session() {
            let store = InMemoryDocumentStore::new();
            store.upsert(&user(), json!("garbage")).await.unwrap();

            let state = adapter_with(&store).load(&user()).await;

            assert_eq!(state.step, Step::initial());
        }
    }

    mod save {
        use super::*;

        #[tokio::test]
        async fn round_trips_state() {
            let store = InMemoryDocumentStore::new();
            let adapter = adapter_with(&store);
            let mut state = SessionState::new("Adwoa");
            state.step = Step::question(4);
            state.student_name = Some("Kwame".to_string());
            state.store_answer(5, "Plastic waste in gutters");
            state.record_intervention("q1a2_notice");
            state.previous_topic_summary = Some("Plastic waste in gutters".to_string());
            state.memory.remember("Plastic waste in gutters", Some("health"));
            state.message_log.append("Adwoa", "Hello **Kwame**", None).unwrap();

            adapter.save(&user(), &state).await;
            let loaded = adapter.load(&user()).await;

            assert_eq!(loaded, state);
        }

        #[tokio::test]
        async fn failure_is_swallowed() {
            let adapter = SessionStoreAdapter::new(Arc::new(FailingStore));
            adapter.save(&user(), &SessionState::new("Kofi")).await;
        }
    }

    #[test]
    fn interrupted_onboarding_restarts_at_name_screen() {
        let mut state = SessionState::new("Kofi");
        state.step = Step::from_index(-2).unwrap();
        assert!(restart_interrupted_onboarding(&mut state));
        assert_eq!(state.step, Step::initial());

        state.step = Step::question(3);
        assert!(!restart_interrupted_onboarding(&mut state));
        assert_eq!(state.step, Step::question(3));
    }
}
