pub mod json_file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Key-value document storage.
///
/// Each key names one top-level collection ("users", "tokens", "chats")
/// holding a plain JSON value. Repositories run synchronous
/// read-modify-write cycles against this trait; there is no transactional
/// isolation and concurrent writers are last-write-wins.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Load the document stored under `key`, or `None` if absent.
    async fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the document stored under `key`.
    async fn write(&self, key: &str, value: Value) -> Result<()>;

    /// Delete the document stored under `key`. Deleting an absent key is a
    /// no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}
