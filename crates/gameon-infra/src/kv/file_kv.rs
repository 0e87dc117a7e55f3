use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use gameon_core::ports::{KeyValuePort, PersistenceError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::fs::{atomic_write, read_to_string_opt};

type Items = BTreeMap<String, String>;

/// Local string settings stored as one JSON object file.
///
/// A missing file reads as empty. Writes rewrite the whole file atomically.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_items(&self) -> Result<Items, PersistenceError> {
        let content = read_to_string_opt(&self.path)
            .await
            .map_err(|e| PersistenceError::Io(format!("{e:#}")))?;
        match content {
            None => Ok(Items::new()),
            Some(content) => serde_json::from_str(&content)
                .map_err(|e| PersistenceError::Corrupt(e.to_string())),
        }
    }

    async fn write_items(&self, items: &Items) -> Result<()> {
        let content = serde_json::to_string_pretty(items).context("serialize settings failed")?;
        atomic_write(&self.path, &content).await
    }
}

#[async_trait]
impl KeyValuePort for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_items().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().await;
        // Corrupt files are overwritten.
        let mut items = match self.read_items().await {
            Ok(items) => items,
            Err(PersistenceError::Corrupt(reason)) => {
                debug!(reason = %reason, "replacing corrupt settings file");
                Items::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
            .await
            .map_err(|e| PersistenceError::Io(format!("{e:#}")))
    }
}
