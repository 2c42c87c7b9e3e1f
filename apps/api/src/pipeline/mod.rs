// The four-stage inference pipeline: expectation extraction, capability
// extraction, alignment scoring, narrative synthesis — sequenced by the
// orchestrator. All generation calls go through llm_client; no direct
// API calls here.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::llm_client::GenerationService;

pub mod alignment;
pub mod capability;
pub mod expectation;
pub mod handlers;
pub mod narrative;
pub mod orchestrator;
pub mod prompts;

/// Calls the generation service and deserializes the response into a stage
/// profile. Returns `None` on a failed call or malformed output — the shared
/// schema-defaulting discipline every stage builds on. Each profile type
/// declares its typed defaults via `#[serde(default)]` on every field, so a
/// partial object still deserializes with the missing keys backfilled.
pub(crate) async fn try_profile<T: DeserializeOwned>(
    llm: &dyn GenerationService,
    prompt: &str,
    system: &str,
    temperature: f32,
    stage: &str,
) -> Option<T> {
    match llm.generate(prompt, system, temperature).await {
        Ok(value) => match serde_json::from_value(value) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("{stage} returned a malformed profile, degrading to defaults: {e}");
                None
            }
        },
        Err(e) => {
            warn!("{stage} generation call failed, degrading to defaults: {e}");
            None
        }
    }
}

/// `try_profile` collapsed to the stage's schema-complete default profile.
/// The pipeline never halts on a single stage's formatting failure.
pub(crate) async fn profile_or_default<T: DeserializeOwned + Default>(
    llm: &dyn GenerationService,
    prompt: &str,
    system: &str,
    temperature: f32,
    stage: &str,
) -> T {
    try_profile(llm, prompt, system, temperature, stage)
        .await
        .unwrap_or_default()
}
