//! Fortune Core Library
//!
//! Error taxonomy and port traits for the fortune service.

// Re-export pure types from fortune-types
pub use fortune_types::*;

pub mod error;
pub mod ports;

pub use error::{FortuneError, Result};
pub use ports::SecondaryStore;
