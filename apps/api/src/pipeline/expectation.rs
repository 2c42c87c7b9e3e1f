//! Expectation Profile Builder — synthesizes the "role reality" profile
//! from aggregated public findings plus optional user-supplied review and
//! insight text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::GenerationService;
use crate::pipeline::{profile_or_default, prompts};
use crate::search::aggregator::Finding;

/// One sub-round inside a larger round (e.g. onsite breakdowns).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubRound {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One interview round inferred from public signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewRound {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub subrounds: Vec<SubRound>,
}

/// Structured summary of what a role/employer is inferred to require.
/// Never partially undefined: every field has a typed empty default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectationProfile {
    #[serde(default)]
    pub rounds: Vec<InterviewRound>,
    #[serde(default)]
    pub round_count: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub question_patterns: Vec<String>,
    #[serde(default)]
    pub liked_project_types: Vec<String>,
    #[serde(default)]
    pub education_expectations: Vec<String>,
    #[serde(default)]
    pub seniority_pattern: String,
    #[serde(default)]
    pub summary: String,
}

/// Builds the expectation profile for an (employer, role) pair.
/// Malformed generation output degrades to a fully-empty profile.
pub async fn build_expectation_profile(
    llm: &dyn GenerationService,
    employer: &str,
    role: &str,
    findings: &[Finding],
    user_review: &str,
    user_insight: &str,
) -> ExpectationProfile {
    let prompt = prompts::expectation_prompt(employer, role, findings, user_review, user_insight);

    let profile: ExpectationProfile = profile_or_default(
        llm,
        &prompt,
        prompts::EXPECTATION_SYSTEM,
        prompts::EXPECTATION_TEMPERATURE,
        "expectation builder",
    )
    .await;

    info!(
        "expectation profile built: {} rounds, {} required skills",
        profile.rounds.len(),
        profile.required_skills.len()
    );

    profile
}
