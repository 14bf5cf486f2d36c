//! File-based Document Store Adapter
//!
//! Stores each user's session document as a YAML file on disk, named
//! after the user id. Writes go to a temporary file first and are then
//! renamed over the old document.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::UserId;
use crate::ports::{merge_documents, DocumentStore, StoreError};

/// File-based storage for session documents
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    base_path: PathBuf,
}

impl FileDocumentStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileDocumentStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the document for a user
    fn document_path(&self, user_id: &UserId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", user_id))
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))
    }

    async fn read(&self, path: &Path) -> Result<Option<Value>, StoreError> {
        let yaml = match fs::read_to_string(path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };

        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Value>, StoreError> {
        self.read(&self.document_path(user_id)).await
    }

    async fn upsert(&self, user_id: &UserId, document: Value) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        let path = self.document_path(user_id);

        let merged = match self.read(&path).await? {
            Some(mut existing) => {
                merge_documents(&mut existing, document);
                existing
            }
            None => document,
        };

        let yaml = serde_yaml::to_string(&merged)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        let tmp_path = path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn load_missing_document_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path());

        assert!(store.get(&user("ama")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_load_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path().join("sessions"));
        let doc = json!({
            "step_index": 7,
            "answers": {"5": "flooding", "6": "market"},
            "student_name": "Ama",
            "memory": {"topic_focus": null}
        });

        store.upsert(&user("ama"), doc.clone()).await.unwrap();

        assert_eq!(store.get(&user("ama")).await.unwrap().unwrap(), doc);
        assert!(store.document_path(&user("ama")).exists());
    }

    #[tokio::test]
    async fn upsert_merges_with_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path());
        store
            .upsert(&user("ama"), json!({"answers": {"5": "a"}, "legacy": 1}))
            .await
            .unwrap();

        store
            .upsert(&user("ama"), json!({"answers": {"6": "b"}}))
            .await
            .unwrap();

        assert_eq!(
            store.get(&user("ama")).await.unwrap().unwrap(),
            json!({"answers": {"5": "a", "6": "b"}, "legacy": 1})
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path());
        std::fs::write(store.document_path(&user("ama")), "step_index: [unclosed").unwrap();

        let result = store.get(&user("ama")).await;

        assert!(matches!(result, Err(StoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path());

        store.upsert(&user("ama"), json!({"a": 1})).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["ama.yaml".to_string()]);
    }
}
