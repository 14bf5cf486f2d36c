//! In-Memory Document Store Adapter
//!
//! Keeps session documents in memory. Used for development and tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{merge_documents, DocumentStore, StoreError};

/// In-memory storage for session documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<UserId, Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored documents (useful for tests)
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    /// Get the number of stored documents
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Value>, StoreError> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, user_id: &UserId, document: Value) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(user_id) {
            Some(existing) => merge_documents(existing, document),
            None => {
                documents.insert(user_id.clone(), document);
            }
        }
        Ok(())
    }
}
