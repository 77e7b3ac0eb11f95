//! Server configuration
//!
//! Every setting can come from a flag or from the environment.

use crate::storage::RedisOptions;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "fortune-server", version, about = "Serve fortunes over HTTP")]
pub struct Config {
    /// Address the HTTP listener binds to
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:9000")]
    pub bind_address: SocketAddr,

    /// Redis address, `host:port` or `redis://` URL
    #[arg(long, env = "REDIS_ADDR", default_value = "redis:6379")]
    pub redis_addr: String,

    /// Hash holding the fortunes in Redis
    #[arg(long, env = "REDIS_COLLECTION", default_value = "fortunes")]
    pub redis_collection: String,

    #[arg(long, env = "REDIS_CONNECT_ATTEMPTS", default_value_t = 1)]
    pub redis_connect_attempts: u32,

    #[arg(long, env = "REDIS_RETRY_DELAY_MS", default_value_t = 2000)]
    pub redis_retry_delay_ms: u64,

    /// Per-call bound on Redis round trips
    #[arg(long, env = "REDIS_TIMEOUT_MS", default_value_t = 2000)]
    pub redis_timeout_ms: u64,

    /// Run in-memory only, never contacting Redis
    #[arg(long, env = "NO_REDIS")]
    pub no_redis: bool,

    /// Start without the default fortunes
    #[arg(long, env = "NO_SEED")]
    pub no_seed: bool,
}

impl Config {
    pub fn redis_options(&self) -> RedisOptions {
        RedisOptions {
            addr: self.redis_addr.clone(),
            collection: self.redis_collection.clone(),
            connect_attempts: self.redis_connect_attempts,
            retry_delay: Duration::from_millis(self.redis_retry_delay_ms),
            timeout: Duration::from_millis(self.redis_timeout_ms),
        }
    }
}
