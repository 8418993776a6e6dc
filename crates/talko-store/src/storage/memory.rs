use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::storage::StorageBackend;

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        self.documents.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.documents.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn read_back_what_was_written() {
        let storage = MemoryStorage::new();
        storage.write("users", json!([{"id": "u1"}])).await.unwrap();

        let value = storage.read("users").await.unwrap();
        assert_eq!(value, Some(json!([{"id": "u1"}])));
    }

    #[tokio::test]
    async fn missing_key_reads_none() {
        let storage = MemoryStorage::new();
        assert!(storage.read("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.write("tokens", json!({})).await.unwrap();
        storage.remove("tokens").await.unwrap();
        storage.remove("tokens").await.unwrap();
        assert!(storage.read("tokens").await.unwrap().is_none());
    }
}
