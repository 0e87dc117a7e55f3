use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use gameon_core::ports::{
    merge_documents, Document, DocumentStorePort, StoreReadError, StoreWriteError,
};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::fs::{atomic_write, read_to_string_opt};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentPathError {
    #[error("empty path segment")]
    Empty,

    #[error("path segment {0:?} contains a separator or dot prefix")]
    Unsafe(String),
}

/// Document store keeping one pretty-printed JSON file per document.
///
/// Layout: `<root>/<collection>/<id>.json`. Merge-writes are serialized
/// within the process so a read-merge-write never interleaves with another.
pub struct JsonFileDocumentStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, DocumentPathError> {
        Ok(self.root.join(check_segment(collection)?))
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf, DocumentPathError> {
        let file = format!("{}.json", check_segment(id)?);
        Ok(self.collection_dir(collection)?.join(file))
    }

    async fn read_document(&self, path: &Path) -> Result<Option<Document>> {
        let Some(content) = read_to_string_opt(path).await? else {
            return Ok(None);
        };
        let doc: Document = serde_json::from_str(&content)
            .with_context(|| format!("parse document failed: {}", path.display()))?;
        Ok(Some(doc))
    }

    async fn merge_into_file(&self, path: &Path, partial: Document) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.read_document(path).await?.unwrap_or_default();
        merge_documents(&mut doc, partial);
        let content = serde_json::to_string_pretty(&doc).context("serialize document failed")?;
        atomic_write(path, &content).await
    }
}

fn check_segment(segment: &str) -> Result<&str, DocumentPathError> {
    if segment.is_empty() {
        return Err(DocumentPathError::Empty);
    }
    if segment.starts_with('.') || segment.contains(['/', '\\']) {
        return Err(DocumentPathError::Unsafe(segment.to_string()));
    }
    Ok(segment)
}

#[async_trait]
impl DocumentStorePort for JsonFileDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreReadError> {
        let path = self
            .document_path(collection, id)
            .map_err(|e| StoreReadError::Unavailable(e.to_string()))?;

        match read_to_string_opt(&path).await {
            Ok(None) => Ok(None),
            Ok(Some(content)) => serde_json::from_str::<Document>(&content)
                .map(Some)
                .map_err(|e| StoreReadError::Malformed {
                    collection: collection.to_string(),
                    id: id.to_string(),
                    reason: e.to_string(),
                }),
            Err(e) => Err(StoreReadError::Unavailable(format!("{e:#}"))),
        }
    }

    async fn merge_write_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Result<(), StoreWriteError> {
        let path = self
            .document_path(collection, id)
            .map_err(|e| StoreWriteError::Rejected(e.to_string()))?;

        self.merge_into_file(&path, partial)
            .await
            .map_err(|e| StoreWriteError::Unavailable(format!("{e:#}")))?;
        debug!(collection, id, "document merged");
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, StoreReadError> {
        let dir = self
            .collection_dir(collection)
            .map_err(|e| StoreReadError::Unavailable(e.to_string()))?;

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreReadError::Unavailable(format!(
                    "read dir failed: {}: {e}",
                    dir.display()
                )))
            }
        };

        let mut docs = Vec::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|e| StoreReadError::Unavailable(e.to_string()))?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match self.read_document(&path).await {
                Ok(Some(doc)) => docs.push((id, doc)),
                Ok(None) => {}
                Err(e) => debug!(error = %e, id, "skipping unreadable document"),
            }
        }
        docs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn absent_document_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(dir.path());

        assert_eq!(store.get_document("users", "u1").await.unwrap(), None);
        assert!(store.list_documents("users").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn merge_write_keeps_existing_fields() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(dir.path());

        store
            .merge_write_document("users", "u1", doc(json!({ "a": 1, "b": "keep" })))
            .await
            .unwrap();
        store
            .merge_write_document("users", "u1", doc(json!({ "a": 2 })))
            .await
            .unwrap();

        let stored = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(Value::Object(stored), json!({ "a": 2, "b": "keep" }));
        assert!(dir.path().join("users").join("u1.json").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("users")).unwrap();
        std::fs::write(dir.path().join("users").join("u1.json"), "{not json").unwrap();
        let store = JsonFileDocumentStore::new(dir.path());

        let err = store.get_document("users", "u1").await.unwrap_err();
        assert!(matches!(err, StoreReadError::Malformed { .. }));
    }

    #[tokio::test]
    async fn list_returns_sorted_documents() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(dir.path());
        for id in ["b", "a", "c"] {
            store
                .merge_write_document("matches", id, doc(json!({ "id": id })))
                .await
                .unwrap();
        }

        let ids: Vec<String> = store
            .list_documents("matches")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(dir.path());

        let err = store
            .merge_write_document("users", "../escape", Document::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreWriteError::Rejected(_)));
        assert_eq!(check_segment(""), Err(DocumentPathError::Empty));
    }
}
