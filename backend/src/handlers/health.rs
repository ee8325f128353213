//! Health check handler

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "cropsight-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
