//! Shared building blocks for the animal API crates: response types and
//! tracing subscriber setup.

pub mod types;
pub mod utils;
