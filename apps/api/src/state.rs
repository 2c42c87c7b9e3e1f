use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerationService;
use crate::search::SearchProvider;

/// Shared application state injected into all route handlers via Axum
/// extractors. Both external capabilities are trait objects so tests can
/// swap in deterministic stubs without touching process-wide state.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn GenerationService>,
    pub search: Arc<dyn SearchProvider>,
    pub config: Config,
}
