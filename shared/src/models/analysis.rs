//! Analysis record models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::knowledge::CropType;
use crate::types::{EnvironmentalReadings, Severity};

/// A stored disease analysis.
///
/// Created once per diagnosis request and never mutated afterwards. The
/// disease fields are copied out of the knowledge base record chosen by the
/// matcher; severity, confidence and the impact sentence are derived from
/// the vision model's description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub crop: CropType,
    /// Data URL of the uploaded photo
    pub image_url: String,
    pub disease_name: String,
    pub severity: Severity,
    /// Heuristic certainty percentage, 0-100
    pub confidence: u8,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatment: Vec<String>,
    pub environmental_impact: String,
    pub readings: EnvironmentalReadings,
    /// Free-text description returned by the vision model
    pub model_description: String,
    pub created_at: DateTime<Utc>,
}

/// Compact view of an analysis for history listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: Uuid,
    pub crop: CropType,
    pub disease_name: String,
    pub severity: Severity,
    pub confidence: u8,
    pub created_at: DateTime<Utc>,
    pub image_url: String,
}

impl From<&AnalysisRecord> for AnalysisSummary {
    fn from(record: &AnalysisRecord) -> Self {
        AnalysisSummary {
            id: record.id,
            crop: record.crop,
            disease_name: record.disease_name.clone(),
            severity: record.severity,
            confidence: record.confidence,
            created_at: record.created_at,
            image_url: record.image_url.clone(),
        }
    }
}
