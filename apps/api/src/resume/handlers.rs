//! Axum route handlers for resume files: import, export, questionnaire,
//! and sanitizing raw oracle output.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::codec::{parse_rows, write_csv, write_json, ResumeFormat};
use crate::resume::models::ResumeRow;
use crate::resume::questionnaire::parse_questionnaire;
use crate::resume::sanitizer::MasterResume;
use crate::state::AppState;
use crate::tailoring::pipeline::sanitize_oracle_output;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SanitizeRequest {
    /// Profile id whose contact fields and master resume are trusted.
    pub profile: String,
    pub raw_output: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionnaireRequest {
    pub text: String,
}

/// A file download response with an attachment disposition.
pub fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/import
///
/// Multipart upload with a `file` field (`.csv` or `.json`). Files missing a
/// required column are rejected with 400.
pub async fn handle_import(mut multipart: Multipart) -> Result<Json<Vec<ResumeRow>>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let format = ResumeFormat::from_filename(&filename)?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;

        let rows = parse_rows(format, &data)?;
        info!("Imported {} rows from '{filename}'", rows.len());
        return Ok(Json(rows));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}

/// POST /api/v1/resume/export/csv
pub async fn handle_export_csv(
    Json(rows): Json<Vec<ResumeRow>>,
) -> Result<impl IntoResponse, AppError> {
    let body = write_csv(&rows)?;
    Ok(attachment("text/csv; charset=utf-8", "resume.csv", body))
}

/// POST /api/v1/resume/export/json
pub async fn handle_export_json(
    Json(rows): Json<Vec<ResumeRow>>,
) -> Result<impl IntoResponse, AppError> {
    let body = write_json(&rows)?;
    Ok(attachment("application/json", "resume.json", body))
}

/// POST /api/v1/resume/questionnaire
pub async fn handle_questionnaire(
    Json(request): Json<QuestionnaireRequest>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(Json(parse_questionnaire(&request.text)))
}

/// POST /api/v1/resume/sanitize
///
/// Runs already-obtained oracle output through normalization and
/// sanitization against the stored profile, without calling a model.
pub async fn handle_sanitize(
    State(state): State<AppState>,
    Json(request): Json<SanitizeRequest>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let profile = state.profiles.load(&request.profile).await?;
    let master = state.profiles.load_master(&request.profile).await?;

    let rows = sanitize_oracle_output(
        &request.raw_output,
        MasterResume {
            rows: &master,
            profile: &profile,
        },
        state.config.resume_row_cap,
    );
    Ok(Json(rows))
}
