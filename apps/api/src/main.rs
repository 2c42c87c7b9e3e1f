mod config;
mod errors;
mod extraction;
mod llm_client;
mod pipeline;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GenerationService, OpenAiClient};
use crate::routes::build_router;
use crate::search::{SearchProvider, SerpApiClient};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rolelens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generation client
    let llm: Arc<dyn GenerationService> = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("Generation client initialized (model: {})", llm_client::MODEL);

    // Initialize search client (optional credential; degraded mode without it)
    if config.serpapi_api_key.is_none() {
        warn!("SERPAPI_API_KEY not set; search aggregation will return no findings");
    }
    let search: Arc<dyn SearchProvider> =
        Arc::new(SerpApiClient::new(config.serpapi_api_key.clone()));

    // Build app state
    let state = AppState {
        llm,
        search,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
