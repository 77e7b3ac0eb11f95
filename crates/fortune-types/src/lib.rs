//! Fortune Types - Pure data definitions shared by the fortune crates
//!
//! No async runtime or storage dependencies live here.

pub mod fortune;

pub use fortune::*;
