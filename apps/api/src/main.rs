mod config;
mod errors;
mod jobs;
mod llm_client;
mod profiles;
mod render;
mod resume;
mod routes;
mod state;
mod tailoring;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::fetcher::JobFetcher;
use crate::llm_client::LlmClient;
use crate::profiles::store::ProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobDash API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_backend.clone())?;
    info!(
        "LLM client initialized (backend: {}, model: {})",
        config.llm_backend.name(),
        config.llm_backend.model()
    );

    // Initialize job board client
    let jobs = JobFetcher::new(config.job_api.clone())?;

    // Profiles and master resumes live on disk
    let profiles = ProfileStore::new(&config.user_dir);
    info!("Profile store at {}", profiles.dir().display());

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        jobs,
        profiles,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
