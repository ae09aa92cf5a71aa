use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::ToolResponse;
use crate::jobs::models::{JobSearchRequest, JobSearchResponse};
use crate::state::AppState;

/// POST /api/v1/jobs/search
///
/// Always HTTP 200: provider failures and missing credentials are reported
/// as `{"error": "..."}`.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Json<ToolResponse<JobSearchResponse>> {
    let result = state.jobs.search(&request, Utc::now()).await;
    Json(ToolResponse::from_result(result))
}
