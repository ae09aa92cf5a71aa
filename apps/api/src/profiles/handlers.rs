//! Axum route handlers for profiles and their master resumes.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::resume::models::{Profile, ResumeRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SavedProfileResponse {
    pub id: String,
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct SavedMasterResponse {
    pub id: String,
    pub rows: usize,
}

/// GET /api/v1/profiles
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<ProfileListResponse>, AppError> {
    let profiles = state.profiles.list().await?;
    Ok(Json(ProfileListResponse { profiles }))
}

/// POST /api/v1/profiles
///
/// Creates or replaces a profile. The id is derived from the name.
pub async fn handle_save(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<SavedProfileResponse>, AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let id = state.profiles.save(&profile).await?;
    Ok(Json(SavedProfileResponse { id, profile }))
}

/// GET /api/v1/profiles/:name
pub async fn handle_get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.load(&name).await?))
}

/// GET /api/v1/profiles/:name/master-resume
pub async fn handle_get_master(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    state.profiles.load(&name).await?;
    Ok(Json(state.profiles.load_master(&name).await?))
}

/// PUT /api/v1/profiles/:name/master-resume
///
/// Replaces the master resume wholesale.
pub async fn handle_put_master(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(rows): Json<Vec<ResumeRow>>,
) -> Result<Json<SavedMasterResponse>, AppError> {
    state.profiles.load(&name).await?;
    state.profiles.save_master(&name, &rows).await?;
    Ok(Json(SavedMasterResponse {
        id: name,
        rows: rows.len(),
    }))
}
