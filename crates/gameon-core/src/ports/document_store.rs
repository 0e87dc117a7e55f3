//! Remote keyed document store port.

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::errors::{StoreReadError, StoreWriteError};

/// A stored record: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreReadError>;

    /// Merges `partial` into the stored record, creating it if absent.
    ///
    /// Fields not present in `partial` are left untouched.
    async fn merge_write_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Result<(), StoreWriteError>;

    /// Every `(id, document)` pair in a collection, unordered.
    async fn list_documents(&self, collection: &str)
        -> Result<Vec<(String, Document)>, StoreReadError>;
}

/// Merge-write semantics shared by document store implementations.
///
/// Nested objects merge recursively; any other value (including `null`)
/// replaces the stored one.
pub fn merge_documents(target: &mut Document, partial: Document) {
    for (key, value) in partial {
        let Value::Object(incoming) = value else {
            target.insert(key, value);
            continue;
        };
        if let Some(Value::Object(existing)) = target.get_mut(&key) {
            merge_documents(existing, incoming);
            continue;
        }
        target.insert(key, Value::Object(incoming));
    }
}
