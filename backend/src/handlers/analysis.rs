//! Crop analysis handlers: photo upload, diagnosis, and history

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::AnalysisRecord;
use crate::middleware::CurrentUser;
use crate::services::analysis::AnalyzeInput;
use crate::services::AnalysisService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `csv` switches the history listing to a CSV download
    pub format: Option<String>,
}

/// POST /analyses
///
/// Accepts a multipart form with an `image` part plus crop type and
/// optional environmental readings, and returns the full diagnosis.
pub async fn analyze(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AnalysisRecord>)> {
    let mut input = AnalyzeInput::default();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation {
            field: "body".to_string(),
            message: format!("Invalid multipart body: {}", e),
        })?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let mime = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| AppError::Validation {
                    field: "image".to_string(),
                    message: format!("Failed to read image: {}", e),
                })?;
                image = Some((mime, bytes.to_vec()));
            }
            "crop_type" => input.crop_type = Some(read_text_field(field).await?),
            "temperature" => input.temperature = Some(read_text_field(field).await?),
            "humidity" => input.humidity = Some(read_text_field(field).await?),
            "rainfall" => input.rainfall = Some(read_text_field(field).await?),
            "soil_type" => input.soil_type = Some(read_text_field(field).await?),
            // Unknown parts are ignored rather than rejected
            _ => {}
        }
    }

    let (mime, bytes) = image.ok_or_else(|| AppError::Validation {
        field: "image".to_string(),
        message: "Image file is required".to_string(),
    })?;
    if bytes.is_empty() {
        return Err(AppError::Validation {
            field: "image".to_string(),
            message: "Image file is empty".to_string(),
        });
    }

    tracing::info!(
        "Analyzing {} image ({} bytes) for user {}",
        input.crop_type.as_deref().unwrap_or("unknown"),
        bytes.len(),
        user.user_id
    );

    let service = AnalysisService::new(state.store.clone(), &state.config);
    let record = service.analyze(user.user_id, input, &mime, &bytes).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /analyses
///
/// Diagnosis history for the authenticated user, newest first.
/// `?format=csv` returns a CSV download instead of JSON.
pub async fn list_analyses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let service = AnalysisService::new(state.store.clone(), &state.config);
    let summaries = service.list_analyses(user.user_id)?;

    if params.format.as_deref() == Some("csv") {
        let csv = AnalysisService::export_to_csv(&summaries)?;
        let headers = [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"analyses.csv\"",
            ),
        ];
        return Ok((headers, csv).into_response());
    }

    Ok(Json(summaries).into_response())
}

/// GET /analyses/:id
pub async fn get_analysis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AnalysisRecord>> {
    let service = AnalysisService::new(state.store.clone(), &state.config);
    let record = service.get_analysis(user.user_id, id)?;
    Ok(Json(record))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    let name = field.name().unwrap_or("field").to_string();
    field.text().await.map_err(|e| AppError::Validation {
        field: name,
        message: format!("Invalid text field: {}", e),
    })
}
