pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::profiles::handlers as profiles;
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search
        .route("/api/v1/jobs/search", post(jobs::handle_search))
        // Tailoring
        .route("/api/v1/resume/match", post(tailoring::handle_match))
        .route("/api/v1/resume/tailor", post(tailoring::handle_tailor))
        .route(
            "/api/v1/resume/rewrite-block",
            post(tailoring::handle_rewrite_block),
        )
        // Resume files
        .route("/api/v1/resume/sanitize", post(resume::handle_sanitize))
        .route(
            "/api/v1/resume/questionnaire",
            post(resume::handle_questionnaire),
        )
        .route("/api/v1/resume/import", post(resume::handle_import))
        .route("/api/v1/resume/export/csv", post(resume::handle_export_csv))
        .route("/api/v1/resume/export/json", post(resume::handle_export_json))
        .route("/api/v1/resume/pdf", post(render::handle_render_pdf))
        // Profiles
        .route(
            "/api/v1/profiles",
            get(profiles::handle_list).post(profiles::handle_save),
        )
        .route("/api/v1/profiles/:name", get(profiles::handle_get))
        .route(
            "/api/v1/profiles/:name/master-resume",
            get(profiles::handle_get_master).put(profiles::handle_put_master),
        )
        .with_state(state)
}
