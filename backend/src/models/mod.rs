//! Data models
//!
//! Re-exported from the shared crate so backend code has a single import
//! path for domain types.

pub use shared::models::*;
