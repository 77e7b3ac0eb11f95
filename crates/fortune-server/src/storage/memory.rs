//! In-memory secondary store using DashMap (stands in for Redis)

use async_trait::async_trait;
use dashmap::DashMap;
use fortune_core::{Result, SecondaryStore};
use std::sync::Arc;

/// Key-value collection with the same semantics as the Redis hash
#[derive(Clone, Default)]
pub struct MemorySecondary {
    data: Arc<DashMap<String, String>>,
}

impl MemorySecondary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.data.insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.data.get(key).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl SecondaryStore for MemorySecondary {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.iter().map(|entry| entry.key().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemorySecondary::new();

        store.set("1", "one").await.unwrap();
        assert_eq!(store.get("1").await.unwrap(), Some("one".to_string()));
        assert_eq!(store.get("missing").await.unwrap(), None);

        // Overwrite
        store.set("1", "uno").await.unwrap();
        assert_eq!(store.get("1").await.unwrap(), Some("uno".to_string()));
    }

    #[tokio::test]
    async fn test_keys_and_ping() {
        let store = MemorySecondary::new();
        store.insert("a", "x");
        store.insert("b", "y");

        let mut keys = store.keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert!(store.ping().await.is_ok());
    }
}
