//! Document Store Port - Interface for persisting session documents.
//!
//! Documents are JSON values keyed by an opaque user id. Writes merge
//! into whatever is already stored, so fields the writer does not know
//! about survive.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::UserId;

/// Errors that can occur during document storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize document: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize document: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for whole-document reads and merging writes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads the document for `user_id`, or `None` if it was never written.
    async fn get(&self, user_id: &UserId) -> Result<Option<Value>, StoreError>;

    /// Merges `document` into the stored document for `user_id`.
    ///
    /// Object fields are merged recursively; any other value replaces
    /// what was stored.
    async fn upsert(&self, user_id: &UserId, document: Value) -> Result<(), StoreError>;
}

/// Recursively merges `overlay` into `base`.
///
/// Objects merge key by key; everything else in `overlay` replaces `base`.
pub fn merge_documents(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_documents(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_keeps_unknown_fields() {
        let mut base = json!({"a": 1, "legacy": true});
        merge_documents(&mut base, json!({"a": 2}));
        assert_eq!(base, json!({"a": 2, "legacy": true}));
    }

    #[test]
    fn merge_recurses_into_objects() {
        let mut base = json!({"memory": {"current_lens": "health", "topic_focus": null}});
        merge_documents(&mut base, json!({"memory": {"topic_focus": "water"}}));
        assert_eq!(
            base,
            json!({"memory": {"current_lens": "health", "topic_focus": "water"}})
        );
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let mut base = json!({"log": [1, 2, 3]});
        merge_documents(&mut base, json!({"log": [4]}));
        assert_eq!(base, json!({"log": [4]}));
    }
}
