//! Crop disease analysis service
//!
//! Orchestrates one diagnosis: obtain a free-text description of the photo
//! from the vision model, run the pure matching/inference core over it, and
//! persist the combined record.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use shared::diagnosis::{
    compose_environmental_impact, infer_confidence, infer_severity, match_disease,
};
use shared::models::{AnalysisRecord, AnalysisSummary};
use shared::types::{EnvironmentalReadings, SoilType};
use shared::validation::parse_crop_type;
use shared::CropType;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::vision::encode_image_data_url;
use crate::external::VisionClient;
use crate::storage::MemoryStore;

/// Analysis service
#[derive(Clone)]
pub struct AnalysisService {
    store: Arc<MemoryStore>,
    vision: VisionClient,
}

/// Raw form fields from the multipart analysis request
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeInput {
    pub crop_type: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub rainfall: Option<String>,
    pub soil_type: Option<String>,
}

/// A validated analysis request
#[derive(Debug)]
pub struct AnalysisRequest {
    pub crop: CropType,
    pub readings: EnvironmentalReadings,
}

impl AnalysisService {
    /// Create a new AnalysisService instance
    pub fn new(store: Arc<MemoryStore>, config: &Config) -> Self {
        Self {
            store,
            vision: VisionClient::new(&config.vision),
        }
    }

    /// Run a full analysis for an uploaded image
    pub async fn analyze(
        &self,
        user_id: Uuid,
        input: AnalyzeInput,
        image_mime: &str,
        image_bytes: &[u8],
    ) -> AppResult<AnalysisRecord> {
        let request = validate_input(input)?;
        let image_url = encode_image_data_url(image_mime, image_bytes);

        let description = self
            .vision
            .describe_crop_image(request.crop, &image_url, &request.readings)
            .await?;

        let record = build_record(user_id, &request, image_url, description)?;
        self.store.save_analysis(record)
    }

    /// Diagnosis history for a user, newest first
    pub fn list_analyses(&self, user_id: Uuid) -> AppResult<Vec<AnalysisSummary>> {
        let records = self.store.get_analyses_by_user(user_id)?;
        Ok(records.iter().map(AnalysisSummary::from).collect())
    }

    /// A single analysis, scoped to its owner
    pub fn get_analysis(&self, user_id: Uuid, id: Uuid) -> AppResult<AnalysisRecord> {
        self.store
            .get_analysis(user_id, id)?
            .ok_or_else(|| AppError::NotFound("Analysis".to_string()))
    }

    /// Export history summaries as CSV
    pub fn export_to_csv(summaries: &[AnalysisSummary]) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["id", "crop", "disease", "severity", "confidence", "created_at"])
            .map_err(|e| AppError::Internal(e.to_string()))?;

        for summary in summaries {
            writer
                .write_record([
                    summary.id.to_string(),
                    summary.crop.to_string(),
                    summary.disease_name.clone(),
                    summary.severity.to_string(),
                    summary.confidence.to_string(),
                    summary.created_at.to_rfc3339(),
                ])
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
    }
}

/// Validate and parse the raw form fields
fn validate_input(input: AnalyzeInput) -> AppResult<AnalysisRequest> {
    let crop_field = input.crop_type.as_deref().unwrap_or("").trim().to_string();
    if crop_field.is_empty() {
        return Err(AppError::Validation {
            field: "crop_type".to_string(),
            message: "Crop type is required".to_string(),
        });
    }
    let crop =
        parse_crop_type(&crop_field).map_err(|_| AppError::UnsupportedCrop(crop_field.clone()))?;

    let readings = EnvironmentalReadings {
        temperature: parse_decimal_field("temperature", input.temperature)?,
        humidity: parse_decimal_field("humidity", input.humidity)?,
        rainfall: input.rainfall.filter(|r| !r.trim().is_empty()),
        soil_type: parse_soil_field(input.soil_type)?,
    };

    Ok(AnalysisRequest { crop, readings })
}

fn parse_decimal_field(field: &str, value: Option<String>) -> AppResult<Option<Decimal>> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            let parsed = Decimal::from_str(v.trim()).map_err(|_| AppError::Validation {
                field: field.to_string(),
                message: format!("{} must be a number", field),
            })?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

fn parse_soil_field(value: Option<String>) -> AppResult<Option<SoilType>> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            let parsed = SoilType::from_str(&v.trim().to_lowercase()).map_err(|_| {
                AppError::Validation {
                    field: "soil_type".to_string(),
                    message: "Soil type must be one of clay, loam, sandy, silt, peat".to_string(),
                }
            })?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

/// Assemble the stored record from the matched disease and inferences
fn build_record(
    user_id: Uuid,
    request: &AnalysisRequest,
    image_url: String,
    description: String,
) -> AppResult<AnalysisRecord> {
    // An empty disease list must fail loudly, never guess a diagnosis
    let disease = match_disease(request.crop, &description)
        .ok_or_else(|| AppError::UnsupportedCrop(request.crop.to_string()))?;

    let severity = infer_severity(&description);
    let confidence = infer_confidence(&description);
    let environmental_impact =
        compose_environmental_impact(disease.name, severity, &request.readings);

    Ok(AnalysisRecord {
        id: Uuid::new_v4(),
        user_id,
        crop: request.crop,
        image_url,
        disease_name: disease.name.to_string(),
        severity,
        confidence,
        symptoms: disease.symptoms.iter().map(|s| s.to_string()).collect(),
        causes: disease.causes.iter().map(|s| s.to_string()).collect(),
        treatment: disease.treatment.iter().map(|s| s.to_string()).collect(),
        environmental_impact,
        readings: request.readings.clone(),
        model_description: description,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::Severity;

    fn input(crop: &str) -> AnalyzeInput {
        AnalyzeInput {
            crop_type: Some(crop.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_input_requires_crop() {
        let err = validate_input(AnalyzeInput::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "crop_type"));
    }

    #[test]
    fn test_validate_input_rejects_unknown_crop() {
        let err = validate_input(input("banana")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedCrop(c) if c == "banana"));
    }

    #[test]
    fn test_validate_input_parses_readings() {
        let request = validate_input(AnalyzeInput {
            crop_type: Some("Wheat".to_string()),
            temperature: Some("30".to_string()),
            humidity: Some("".to_string()),
            rainfall: Some("12".to_string()),
            soil_type: Some("loam".to_string()),
        })
        .unwrap();

        assert_eq!(request.crop, CropType::Wheat);
        assert_eq!(request.readings.temperature, Some(Decimal::from(30)));
        assert_eq!(request.readings.humidity, None);
        assert_eq!(request.readings.rainfall.as_deref(), Some("12"));
        assert_eq!(request.readings.soil_type, Some(SoilType::Loam));
    }

    #[test]
    fn test_validate_input_rejects_bad_temperature() {
        let err = validate_input(AnalyzeInput {
            crop_type: Some("rice".to_string()),
            temperature: Some("warm".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "temperature"));
    }

    #[test]
    fn test_build_record_combines_core_outputs() {
        let request = validate_input(AnalyzeInput {
            crop_type: Some("wheat".to_string()),
            temperature: Some("30".to_string()),
            humidity: Some("85".to_string()),
            ..Default::default()
        })
        .unwrap();

        let user_id = Uuid::new_v4();
        let description =
            "Severe orange rust pustules, clearly an advanced infection".to_string();
        let record =
            build_record(user_id, &request, "data:image/jpeg;base64,".to_string(), description)
                .unwrap();

        assert_eq!(record.user_id, user_id);
        assert_eq!(record.disease_name, "Leaf Rust");
        assert_eq!(record.severity, Severity::High);
        assert_eq!(record.confidence, 95);
        assert!(record
            .environmental_impact
            .contains("create favorable conditions for Leaf Rust development"));
        assert_eq!(record.symptoms.len(), 4);
    }

    #[test]
    fn test_export_to_csv() {
        let summaries = vec![AnalysisSummary {
            id: Uuid::nil(),
            crop: CropType::Tomato,
            disease_name: "Early Blight".to_string(),
            severity: Severity::Low,
            confidence: 65,
            created_at: chrono::DateTime::parse_from_rfc3339("2025-06-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            image_url: "data:image/jpeg;base64,".to_string(),
        }];

        let csv = AnalysisService::export_to_csv(&summaries).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,crop,disease,severity,confidence,created_at"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("tomato"));
        assert!(row.contains("Early Blight"));
        assert!(row.contains("low"));
        assert!(row.contains("65"));
    }
}
