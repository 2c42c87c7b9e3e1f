use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The generation credential is required — without it every stage would
/// silently degrade to defaults, so the process fails fast at startup
/// instead. The search credential is optional: without it the pipeline
/// runs with no public signal.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub serpapi_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            serpapi_api_key: std::env::var("SERPAPI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
