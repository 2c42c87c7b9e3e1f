//! Capability Profile Builder — synthesizes the "resume reality" profile
//! from extracted document text plus the skill list the extraction pass
//! produced (or a caller-supplied hint).
//!
//! The builder must not assert experience, credentials, or skills the text
//! does not support. That constraint lives in the instruction itself — the
//! pipeline has no independent means to verify truthfulness afterward.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::GenerationService;
use crate::pipeline::{profile_or_default, prompts};

/// The fixed set of candidate domains. Unknown strings from the generation
/// step collapse into the catch-all rather than voiding the whole profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeDomain {
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    #[serde(rename = "Data Engineering")]
    DataEngineering,
    #[serde(rename = "Data Science / ML")]
    DataScienceMl,
    #[serde(rename = "Analytics / BI")]
    AnalyticsBi,
    #[serde(rename = "DevOps / Infra / SRE")]
    DevOpsInfraSre,
    #[default]
    #[serde(rename = "Product / Business / Other", other)]
    Other,
}

/// Structured summary of what a candidate document demonstrates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityProfile {
    #[serde(default)]
    pub domain: ResumeDomain,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub tech_clusters: Vec<String>,
    #[serde(default)]
    pub project_signals: Vec<String>,
    #[serde(default)]
    pub seniority_signal: String,
    #[serde(default)]
    pub missing_signals: Vec<String>,
}

/// Builds the capability profile from resume text and detected skills.
/// Malformed generation output degrades to a fully-empty profile.
pub async fn build_capability_profile(
    llm: &dyn GenerationService,
    resume_text: &str,
    skills: &[String],
) -> CapabilityProfile {
    let prompt = prompts::capability_prompt(resume_text, skills);

    let profile: CapabilityProfile = profile_or_default(
        llm,
        &prompt,
        prompts::CAPABILITY_SYSTEM,
        prompts::CAPABILITY_TEMPERATURE,
        "capability builder",
    )
    .await;

    info!(
        "capability profile built: domain={:?}, {} strengths, {} weaknesses",
        profile.domain,
        profile.strengths.len(),
        profile.weaknesses.len()
    );

    profile
}
