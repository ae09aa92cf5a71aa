use axum::{response::IntoResponse, Json};

use crate::errors::AppError;
use crate::render::render_resume_pdf;
use crate::resume::handlers::attachment;
use crate::resume::models::ResumeRow;

/// POST /api/v1/resume/pdf
///
/// Renders canonical rows to a PDF download. Missing `name` or
/// `target_roles` is a 422.
pub async fn handle_render_pdf(
    Json(rows): Json<Vec<ResumeRow>>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_resume_pdf(&rows))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF render task failed: {e}")))??;

    Ok(attachment("application/pdf", "resume.pdf", bytes))
}
