//! Storage layer
//!
//! Redis backs the secondary store in production. The DashMap-backed
//! `MemorySecondary` stands in for it in tests.

#[cfg(test)]
pub mod memory;
pub mod redis_store;

#[cfg(test)]
pub use memory::MemorySecondary;
pub use redis_store::{RedisOptions, RedisStore};
