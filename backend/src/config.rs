//! Configuration management for the CropSight Diagnosis Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROPSIGHT_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Vision model API configuration
    pub vision: VisionConfig,

    /// Upload limits
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Secret key for signing JWT tokens
    pub jwt_secret: String,

    /// Access token expiration in seconds
    pub token_expiry: i64,

    /// OTP validity window in minutes
    pub otp_expiry_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VisionConfig {
    /// OpenAI-compatible API base URL
    pub api_endpoint: String,

    /// API key
    pub api_key: String,

    /// Vision-capable model identifier
    pub model: String,

    /// Completion token cap for the description
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum accepted image size in bytes
    pub max_image_bytes: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROPSIGHT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("auth.jwt_secret", "development-secret-key")?
            .set_default("auth.token_expiry", 86400)?
            .set_default("auth.otp_expiry_minutes", 10)?
            .set_default("vision.api_endpoint", "https://api.openai.com/v1")?
            .set_default("vision.api_key", "")?
            .set_default("vision.model", "gpt-4o-mini")?
            .set_default("vision.max_tokens", 500)?
            .set_default("upload.max_image_bytes", 10 * 1024 * 1024)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROPSIGHT_ prefix)
            .add_source(
                Environment::with_prefix("CROPSIGHT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// True when running in the development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
