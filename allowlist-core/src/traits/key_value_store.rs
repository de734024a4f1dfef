//! Persistent key/value store abstraction

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Key/value store trait
///
/// Platform implementations:
/// - CLI: `JsonFileStore` (one JSON document on disk)
/// - Tests / `--memory`: `InMemoryKeyValueStore`
///
/// Exactly one implementation is chosen at startup. A stored JSON `null`
/// must read back as `None`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    /// * `Ok(Some(value))` - key present
    /// * `Ok(None)` - key absent or `null`
    async fn get(&self, key: &str) -> CoreResult<Option<Value>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: Value) -> CoreResult<()>;

    /// Delete a key; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> CoreResult<()>;

    /// Delete every key. Must succeed even when the stored data cannot be
    /// read back.
    async fn clear(&self) -> CoreResult<()>;
}

/// In-memory key/value store
///
/// Nothing survives the process; used for `--memory` and tests.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|v| !v.is_null())
            .cloned())
    }

    async fn set(&self, key: &str, value: Value) -> CoreResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", json!([1, 2])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!([1, 2])));
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = InMemoryKeyValueStore::new();
        store.set("a", json!(1)).await.unwrap();
        store.set("b", json!(2)).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn null_reads_as_absent() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", Value::Null).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
