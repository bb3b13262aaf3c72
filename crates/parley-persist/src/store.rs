use async_trait::async_trait;

use crate::error::Result;

/// String key-value store holding serialized session history
///
/// No conditional writes: concurrent `put`s on one key resolve as
/// last-writer-wins.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing is stored
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    async fn put(&self, key: &str, value: String) -> Result<()>;
}
