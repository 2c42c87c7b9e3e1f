//! Search capability boundary — one narrow trait plus the SerpAPI client.
//!
//! The aggregator (see `aggregator`) is the only consumer. A missing API key
//! yields empty results rather than an error so the pipeline degrades to
//! "no public signal" instead of failing the request.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub mod aggregator;

const SERPAPI_URL: &str = "https://serpapi.com/search";
const SEARCH_TIMEOUT_SECS: u64 = 15;

/// A single raw search hit before tagging and deduplication.
#[derive(Debug, Clone)]
pub struct RawHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// The search capability every query variant goes through.
/// Carried in `AppState` as `Arc<dyn SearchProvider>` so tests substitute
/// a deterministic stub.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<RawHit>>;
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

/// SerpAPI Google search client. Constructed without a key when
/// `SERPAPI_API_KEY` is unset; every query then returns no hits.
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(SEARCH_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<RawHit>> {
        let Some(api_key) = &self.api_key else {
            return Ok(vec![]);
        };

        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", api_key.as_str()),
                ("num", &limit.to_string()),
                ("hl", "en"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: SerpResponse = response.json().await?;
        debug!(
            "search query {:?} returned {} organic results",
            query,
            data.organic_results.len()
        );

        Ok(data
            .organic_results
            .into_iter()
            .map(|r| RawHit {
                title: r.title,
                snippet: r.snippet,
                link: r.link,
            })
            .collect())
    }
}
