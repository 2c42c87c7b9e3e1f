//! Axum route handlers for the analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::extract_pdf_text;
use crate::pipeline::orchestrator::{run_analysis, AnalysisInput, AnalysisResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub employer: String,
    pub role: String,
    pub resume_text: String,
    #[serde(default)]
    pub skill_hint: Option<String>,
    #[serde(default)]
    pub user_review: String,
    #[serde(default)]
    pub user_insight: String,
}

/// POST /api/v1/analyze
///
/// Runs the full pipeline against raw resume text.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = AnalysisInput {
        employer: request.employer,
        role: request.role,
        resume_text: request.resume_text,
        skill_hint: request.skill_hint,
        user_review: request.user_review,
        user_insight: request.user_insight,
    };

    let result = run_analysis(state.llm.as_ref(), &state.search, input).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/upload
///
/// Multipart variant: the `resume` part carries the document (PDF or plain
/// text); the remaining parts are text fields. PDF extraction fails soft to
/// an empty string, which the orchestrator then rejects as missing input.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut input = AnalysisInput {
        employer: String::new(),
        role: String::new(),
        resume_text: String::new(),
        skill_hint: None,
        user_review: String::new(),
        user_insight: String::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let is_pdf = field
                    .file_name()
                    .map(|f| f.to_ascii_lowercase().ends_with(".pdf"))
                    .unwrap_or(false)
                    || field.content_type() == Some("application/pdf");
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read resume part: {e}")))?;
                input.resume_text = if is_pdf {
                    extract_pdf_text(&bytes)
                } else {
                    String::from_utf8_lossy(&bytes).into_owned()
                };
            }
            other => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read field {other:?}: {e}"))
                })?;
                match other {
                    "employer" => input.employer = text,
                    "role" => input.role = text,
                    "skill_hint" => input.skill_hint = Some(text),
                    "user_review" => input.user_review = text,
                    "user_insight" => input.user_insight = text,
                    _ => {} // unknown parts are ignored
                }
            }
        }
    }

    let result = run_analysis(state.llm.as_ref(), &state.search, input).await?;
    Ok(Json(result))
}
