//! Shared types and domain logic for the CropSight Diagnosis Platform
//!
//! This crate contains the disease knowledge base, the pure diagnosis
//! functions (keyword matching and heuristic inference), and the types
//! shared between the backend, frontend (via WASM), and other components
//! of the system.

pub mod diagnosis;
pub mod knowledge;
pub mod models;
pub mod types;
pub mod validation;

pub use diagnosis::*;
pub use knowledge::*;
pub use models::*;
pub use types::*;
pub use validation::*;
