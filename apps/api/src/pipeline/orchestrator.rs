//! Orchestrator — pure sequencing of the pipeline stages.
//!
//! Flow: validate input → aggregate findings → parse document →
//!       expectation profile → capability profile → alignment → narrative.
//!
//! Every stage is a blocking call on an external capability and stage N+1
//! needs stage N's complete output, so the sequence is strictly linear.
//! The orchestrator carries no retry logic of its own; retries live at the
//! generation-client boundary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{parse_document, DocumentExtraction};
use crate::llm_client::GenerationService;
use crate::pipeline::alignment::{score_alignment, FitProfile};
use crate::pipeline::capability::{build_capability_profile, CapabilityProfile};
use crate::pipeline::expectation::{build_expectation_profile, ExpectationProfile};
use crate::pipeline::narrative::{compose_report, NarrativeReport};
use crate::search::aggregator::collect_findings;
use crate::search::SearchProvider;

/// One analysis request after the handler has resolved the document to text.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub employer: String,
    pub role: String,
    pub resume_text: String,
    /// Caller-supplied skill list; when absent the extraction pass supplies it.
    pub skill_hint: Option<String>,
    pub user_review: String,
    pub user_insight: String,
}

/// The aggregate result: the document extraction, the three profiles, and
/// the final narrative. Created once per request, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub extraction: DocumentExtraction,
    pub expectation: ExpectationProfile,
    pub capability: CapabilityProfile,
    pub fit: FitProfile,
    pub report: NarrativeReport,
}

/// Runs the full analysis pipeline.
///
/// Rejects missing employer/role/resume text before any stage runs. After
/// that point a stage can only degrade to defaults, never abort: the
/// narrative still renders and explains the limitations.
pub async fn run_analysis(
    llm: &dyn GenerationService,
    search: &Arc<dyn SearchProvider>,
    input: AnalysisInput,
) -> Result<AnalysisResult, AppError> {
    let employer = input.employer.trim().to_string();
    let role = input.role.trim().to_string();

    if employer.is_empty() {
        return Err(AppError::Validation("employer is required".to_string()));
    }
    if role.is_empty() {
        return Err(AppError::Validation("role is required".to_string()));
    }
    if input.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "no resume text was provided or extracted".to_string(),
        ));
    }

    let id = Uuid::new_v4();
    info!("analysis {id}: starting for {employer:?} / {role:?}");

    let findings = collect_findings(search, &employer, &role).await;
    info!("analysis {id}: {} findings aggregated", findings.len());

    let extraction = parse_document(llm, &input.resume_text).await;
    info!(
        "analysis {id}: document parsed, {} exact skills",
        extraction.exact_skills.len()
    );

    let skills: Vec<String> = match &input.skill_hint {
        Some(hint) if !hint.trim().is_empty() => hint
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => extraction.normalized_skills.clone(),
    };

    let expectation = build_expectation_profile(
        llm,
        &employer,
        &role,
        &findings,
        &input.user_review,
        &input.user_insight,
    )
    .await;

    let capability = build_capability_profile(llm, &extraction.text, &skills).await;

    let fit = score_alignment(llm, &expectation, &capability).await;

    let report = compose_report(
        llm,
        &employer,
        &role,
        &expectation,
        &capability,
        &fit,
        &input.user_review,
        &input.user_insight,
    )
    .await;

    info!(
        "analysis {id}: complete, overall fit {}/100 ({:?})",
        fit.overall_score, fit.category
    );

    Ok(AnalysisResult {
        id,
        generated_at: Utc::now(),
        extraction,
        expectation,
        capability,
        fit,
        report,
    })
}
