//! Business logic services for the CropSight Diagnosis Platform

pub mod analysis;
pub mod auth;

pub use analysis::AnalysisService;
pub use auth::AuthService;
