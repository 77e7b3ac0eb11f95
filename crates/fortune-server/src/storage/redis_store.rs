//! Redis-backed secondary store
//!
//! Fortunes live in a single hash: field = id, value = message.

use async_trait::async_trait;
use fortune_core::{FortuneError, Result, SecondaryStore};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError, RedisResult};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RedisOptions {
    /// `host:port` or a full `redis://` URL
    pub addr: String,
    /// Name of the hash holding the fortunes
    pub collection: String,
    pub connect_attempts: u32,
    pub retry_delay: Duration,
    /// Upper bound for every round trip, including the initial connect
    pub timeout: Duration,
}

impl RedisOptions {
    pub fn url(&self) -> String {
        if self.addr.starts_with("redis://") || self.addr.starts_with("rediss://") {
            self.addr.clone()
        } else {
            format!("redis://{}", self.addr)
        }
    }
}

pub struct RedisStore {
    conn: ConnectionManager,
    collection: String,
    timeout: Duration,
}

fn redis_error(e: RedisError) -> FortuneError {
    FortuneError::SecondaryStore(e.to_string())
}

impl RedisStore {
    /// Connect and PING once
    pub async fn connect(options: &RedisOptions) -> Result<Self> {
        let client = redis::Client::open(options.url()).map_err(redis_error)?;
        let conn = tokio::time::timeout(options.timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                FortuneError::SecondaryStore(format!("connect to {} timed out", options.addr))
            })?
            .map_err(redis_error)?;

        let store = Self {
            conn,
            collection: options.collection.clone(),
            timeout: options.timeout,
        };
        store.ping().await?;
        Ok(store)
    }

    /// Connect, retrying up to `connect_attempts` times
    pub async fn connect_with_retry(options: &RedisOptions) -> Result<Self> {
        let attempts = options.connect_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match Self::connect(options).await {
                Ok(store) => {
                    info!("Connected to Redis at {}", options.addr);
                    return Ok(store);
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: Redis connection to {} failed: {}",
                        attempt, attempts, options.addr, e
                    );
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(options.retry_delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            FortuneError::SecondaryStore(format!("no connection to {}", options.addr))
        }))
    }

    async fn bounded<T>(
        &self,
        op: &str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(redis_error),
            Err(_) => Err(FortuneError::SecondaryStore(format!(
                "{} timed out after {:?}",
                op, self.timeout
            ))),
        }
    }
}

#[async_trait]
impl SecondaryStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        self.bounded(
            "HGET",
            conn.hget::<_, _, Option<String>>(&self.collection, key),
        )
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        self.bounded(
            "HSET",
            conn.hset::<_, _, _, ()>(&self.collection, key, value),
        )
        .await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        self.bounded("HKEYS", conn.hkeys::<_, Vec<String>>(&self.collection))
            .await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let cmd = redis::cmd("PING");
        let reply: String = self.bounded("PING", cmd.query_async(&mut conn)).await?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(FortuneError::SecondaryStore(format!(
                "unexpected PING reply: {}",
                reply
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(addr: &str) -> RedisOptions {
        RedisOptions {
            addr: addr.to_string(),
            collection: "fortunes".to_string(),
            connect_attempts: 2,
            retry_delay: Duration::from_millis(10),
            timeout: Duration::from_millis(500),
        }
    }

    #[test]
    fn test_url_normalization() {
        assert_eq!(options("redis:6379").url(), "redis://redis:6379");
        assert_eq!(
            options("redis://cache.local:6380/2").url(),
            "redis://cache.local:6380/2"
        );
        assert_eq!(options("rediss://secure:6379").url(), "rediss://secure:6379");
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        // Port 1 on loopback refuses connections
        let result = RedisStore::connect_with_retry(&options("127.0.0.1:1")).await;
        match result {
            Err(e) => assert!(matches!(e, FortuneError::SecondaryStore(_))),
            Ok(_) => panic!("connection to a closed port should fail"),
        }
    }
}
