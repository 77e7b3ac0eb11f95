//! Fortune store service
//!
//! The in-memory map is authoritative once loaded. When a secondary store is
//! attached, reads by id refresh from it and creates are mirrored to it, but
//! its failures never reach the caller.

use fortune_core::{Fortune, FortuneError, Result, SecondaryStore};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub struct FortuneStore {
    fortunes: RwLock<HashMap<String, Fortune>>,
    secondary: Option<Arc<dyn SecondaryStore>>,
}

impl FortuneStore {
    pub fn new(seed: Vec<Fortune>, secondary: Option<Arc<dyn SecondaryStore>>) -> Self {
        let fortunes = seed.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self {
            fortunes: RwLock::new(fortunes),
            secondary,
        }
    }

    /// Store without a secondary replica
    pub fn in_memory(seed: Vec<Fortune>) -> Self {
        Self::new(seed, None)
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    pub async fn len(&self) -> usize {
        self.fortunes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fortunes.read().await.is_empty()
    }

    /// Snapshot of every record, in no particular order
    pub async fn list(&self) -> Vec<Fortune> {
        let fortunes = self.fortunes.read().await;
        fortunes.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Result<Fortune> {
        if let Some(secondary) = &self.secondary {
            match secondary.get(id).await {
                Ok(Some(message)) => {
                    debug!("Refreshed fortune {} from secondary store", id);
                    let mut fortunes = self.fortunes.write().await;
                    fortunes.insert(id.to_string(), Fortune::new(id, message));
                }
                Ok(None) => debug!("Fortune {} not in secondary store", id),
                Err(e) => warn!("Secondary store read failed for {}: {}", id, e),
            }
        }

        let fortunes = self.fortunes.read().await;
        fortunes
            .get(id)
            .cloned()
            .ok_or_else(|| FortuneError::NotFound(id.to_string()))
    }

    /// Insert or overwrite, then mirror to the secondary store
    pub async fn create(&self, fortune: Fortune) -> Fortune {
        {
            let mut fortunes = self.fortunes.write().await;
            fortunes.insert(fortune.id.clone(), fortune.clone());
        }
        debug!("Stored fortune {}", fortune.id);

        if let Some(secondary) = &self.secondary {
            if let Err(e) = secondary.set(&fortune.id, &fortune.message).await {
                warn!("Secondary store write failed for {}: {}", fortune.id, e);
            }
        }

        fortune
    }

    pub async fn random(&self) -> Result<Fortune> {
        let snapshot = self.list().await;
        snapshot
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| FortuneError::NotFound("random".to_string()))
    }

    /// Id of a uniformly chosen record, `None` when the store is empty
    pub async fn random_id(&self) -> Option<String> {
        self.random().await.ok().map(|f| f.id)
    }

    /// Pull every record of the secondary collection into memory.
    ///
    /// Keys are fetched one at a time; a key that fails to load is skipped.
    /// Returns the number of records loaded.
    pub async fn load_from_secondary(&self) -> usize {
        let Some(secondary) = &self.secondary else {
            return 0;
        };

        let keys = match secondary.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to list secondary store keys: {}", e);
                return 0;
            }
        };

        let mut loaded = 0;
        for key in keys {
            match secondary.get(&key).await {
                Ok(Some(message)) => {
                    info!("Loaded fortune {} => {}", key, message);
                    let mut fortunes = self.fortunes.write().await;
                    fortunes.insert(key.clone(), Fortune::new(key, message));
                    loaded += 1;
                }
                Ok(None) => debug!("Key {} vanished during load", key),
                Err(e) => warn!("Failed to load fortune {}: {}", key, e),
            }
        }
        loaded
    }
}
