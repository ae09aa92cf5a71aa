//! Axum route handlers for the Tailoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{AppError, ToolResponse};
use crate::resume::models::{canonical_label, ResumeRow, Section, TARGET_ROLES};
use crate::resume::sanitizer::MasterResume;
use crate::state::AppState;
use crate::tailoring::matcher::{match_rows, ScoredRow};
use crate::tailoring::pipeline::tailor_resume;
use crate::tailoring::rewriter::{
    bullet_limit, rewrite_block, rewrite_summary, rewrite_target_roles, RewrittenBlock,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub profile: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub rewritten_blocks: Vec<ResumeRow>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    pub rows: Vec<ResumeRow>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<ScoredRow>,
}

#[derive(Debug, Deserialize)]
pub struct RewriteBlockRequest {
    pub job_description: String,
    pub section: String,
    #[serde(default)]
    pub subsection: String,
    pub content: String,
    /// Overrides the slot-based bullet limit.
    pub limit: Option<usize>,
}

fn require_jd(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/tailor
///
/// Rewrites the stored master resume against a JD and returns the canonical
/// result. A model failure comes back in-band as `{"error": "..."}`.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<ToolResponse<TailorResponse>>, AppError> {
    require_jd(&request.job_description)?;

    let profile = state.profiles.load(&request.profile).await?;
    let master = state.profiles.load_master(&request.profile).await?;

    let result = tailor_resume(
        state.llm.as_ref(),
        &request.job_description,
        MasterResume {
            rows: &master,
            profile: &profile,
        },
        state.config.resume_row_cap,
    )
    .await
    .map(|rewritten_blocks| TailorResponse { rewritten_blocks });

    if let Ok(response) = &result {
        if response.rewritten_blocks.first().is_some_and(ResumeRow::is_error) {
            warn!("Tailoring for '{}' produced no usable rows", request.profile);
        }
    }

    Ok(Json(ToolResponse::from_result(result)))
}

/// POST /api/v1/resume/match
pub async fn handle_match(Json(request): Json<MatchRequest>) -> Result<Json<MatchResponse>, AppError> {
    require_jd(&request.job_description)?;
    if request.rows.is_empty() {
        return Err(AppError::Validation(
            "Invalid or missing resume content".to_string(),
        ));
    }

    Ok(Json(MatchResponse {
        matches: match_rows(&request.job_description, &request.rows),
    }))
}

/// POST /api/v1/resume/rewrite-block
///
/// Rewrites one block against a JD: `personal_info/target_roles`, the
/// professional summary, or the bullets of an experience or project entry.
/// A model failure comes back in-band as `{"error": "..."}`.
pub async fn handle_rewrite_block(
    State(state): State<AppState>,
    Json(request): Json<RewriteBlockRequest>,
) -> Result<Json<ToolResponse<RewrittenBlock>>, AppError> {
    require_jd(&request.job_description)?;

    let oracle = state.llm.as_ref();
    let jd = request.job_description.as_str();
    let subsection = canonical_label(&request.subsection);

    let result = match Section::from_label(&request.section) {
        Some(Section::PersonalInfo) if subsection == TARGET_ROLES => {
            rewrite_target_roles(oracle, jd, &request.content).await
        }
        Some(Section::ProfessionalSummary) => rewrite_summary(oracle, jd, &request.content).await,
        Some(section @ (Section::ProfessionalExperience | Section::Projects)) => {
            let limit = request
                .limit
                .unwrap_or_else(|| bullet_limit(section, &subsection));
            rewrite_block(oracle, jd, &request.content, limit).await
        }
        _ => {
            return Err(AppError::Validation(format!(
                "Cannot rewrite '{}/{}': only target_roles, the summary, experience and project blocks are rewritable",
                request.section, request.subsection
            )))
        }
    };

    Ok(Json(ToolResponse::from_result(result)))
}
