//! Shared building blocks for the student portal crates.

pub mod types;
pub mod utils;
