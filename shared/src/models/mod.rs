//! Domain models for the CropSight Diagnosis Platform

mod analysis;
mod otp;
mod user;

pub use analysis::*;
pub use otp::*;
pub use user::*;
