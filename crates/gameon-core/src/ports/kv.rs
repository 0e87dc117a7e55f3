use async_trait::async_trait;

use crate::ports::errors::PersistenceError;

/// Local string key-value persistence that survives restarts.
#[async_trait]
pub trait KeyValuePort: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}
