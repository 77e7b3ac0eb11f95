//! Secondary key-value store the fortune map is mirrored to
//!
//! Every key lives inside a single named collection; the key is the fortune
//! id and the value is its message.

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SecondaryStore: Send + Sync {
    /// Fetch the message stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// All keys currently held in the collection
    async fn keys(&self) -> Result<Vec<String>>;

    /// Connectivity check
    async fn ping(&self) -> Result<()> {
        self.keys().await.map(|_| ())
    }
}
