//! Business logic services

pub mod fortune_store;

pub use fortune_store::FortuneStore;
