//! External API integrations

pub mod vision;

pub use vision::VisionClient;
