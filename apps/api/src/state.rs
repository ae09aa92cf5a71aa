use std::sync::Arc;

use crate::config::Config;
use crate::jobs::fetcher::JobFetcher;
use crate::llm_client::TextOracle;
use crate::profiles::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Completion backend. `LlmClient` in production, canned oracles in tests.
    pub llm: Arc<dyn TextOracle>,
    pub jobs: JobFetcher,
    pub profiles: ProfileStore,
}
