//! Document extraction — turns an uploaded artifact or raw string into a
//! `DocumentExtraction` the capability builder can consume.
//!
//! Extraction fails soft at every step: a corrupt PDF yields an empty
//! string, a malformed structured parse falls back to a heading-based
//! splitter, and a failed verbatim pass is backfilled from the normalized
//! skill list so a caller never receives an empty skill set when any skill
//! was detected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::llm_client::GenerationService;
use crate::pipeline::capability::ResumeDomain;

pub mod prompts;

/// Structured result of parsing one candidate document. Produced once per
/// analysis request and never mutated afterward.
///
/// `exact_skills` preserves phrases exactly as written in the document
/// (casing, spacing, punctuation); `normalized_skills` is the grouped,
/// relabeled list used for comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentExtraction {
    pub text: String,
    pub exact_skills: Vec<String>,
    pub normalized_skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub summary_points: Vec<String>,
    pub tech_clusters: Vec<String>,
    pub domain: ResumeDomain,
}

/// Wire schema for the normalizing structured-parse pass.
#[derive(Debug, Clone, Default, Deserialize)]
struct StructuredParse {
    #[serde(default)]
    clean_text: String,
    #[serde(default)]
    education: Vec<String>,
    #[serde(default)]
    experience: Vec<String>,
    #[serde(default)]
    projects: Vec<String>,
    #[serde(default)]
    certifications: Vec<String>,
    #[serde(default)]
    summary_points: Vec<String>,
    #[serde(default)]
    domain: ResumeDomain,
    #[serde(default)]
    tech_clusters: Vec<String>,
    #[serde(default)]
    skills: Vec<String>,
}

/// Wire schema for the verbatim exact-phrase pass. Elements are kept as raw
/// values so a stray non-string entry drops silently instead of voiding the
/// whole list.
#[derive(Debug, Clone, Default, Deserialize)]
struct ExactSkillList {
    #[serde(default)]
    exact_skills: Vec<Value>,
}

/// Extracts plain text from PDF bytes. Any failure (corrupt file,
/// unsupported encoding) yields an empty string.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF text extraction failed, treating document as empty: {e}");
            String::new()
        }
    }
}

/// Normalizes whitespace: strips NULs, folds CR into LF, collapses runs of
/// spaces/tabs, and limits blank runs to a single separating line.
pub fn clean_text(text: &str) -> String {
    let normalized = text.replace('\0', "").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0usize;
    for raw_line in normalized.split('\n') {
        let line = raw_line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

/// Runs the two-phase extraction against the cleaned document text:
/// a normalizing structured parse and a verbatim exact-phrase pass.
pub async fn parse_document(llm: &dyn GenerationService, raw_text: &str) -> DocumentExtraction {
    let text = clean_text(raw_text);
    if text.is_empty() {
        return DocumentExtraction::default();
    }

    let structured = match llm
        .generate(
            &prompts::structured_parse_prompt(&text),
            prompts::STRUCTURED_PARSE_SYSTEM,
            prompts::STRUCTURED_PARSE_TEMPERATURE,
        )
        .await
    {
        Ok(value) => match serde_json::from_value::<StructuredParse>(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("structured parse returned a malformed document, using heading fallback: {e}");
                fallback_sections(&text)
            }
        },
        Err(e) => {
            warn!("structured parse call failed, using heading fallback: {e}");
            fallback_sections(&text)
        }
    };

    let exact_skills = match llm
        .generate(
            &prompts::exact_skills_prompt(&text),
            prompts::EXACT_SKILLS_SYSTEM,
            prompts::EXACT_SKILLS_TEMPERATURE,
        )
        .await
    {
        Ok(value) => serde_json::from_value::<ExactSkillList>(value)
            .map(|list| {
                list.exact_skills
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default(),
        Err(e) => {
            warn!("exact skill pass failed, backfilling from normalized list: {e}");
            vec![]
        }
    };

    // Backfill: the caller must never see an empty exact list when the
    // normalizing pass detected skills.
    let exact_skills = if exact_skills.is_empty() {
        structured.skills.clone()
    } else {
        exact_skills
    };

    let text = if structured.clean_text.trim().is_empty() {
        text
    } else {
        structured.clean_text
    };

    DocumentExtraction {
        text,
        exact_skills,
        normalized_skills: structured.skills,
        education: structured.education,
        experience: structured.experience,
        projects: structured.projects,
        certifications: structured.certifications,
        summary_points: structured.summary_points,
        tech_clusters: structured.tech_clusters,
        domain: structured.domain,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SectionKind {
    Education,
    Experience,
    Projects,
    Certifications,
}

fn heading_for(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim();
    // Headings are short lines; a 200-char paragraph mentioning
    // "experience" is body text, not a heading.
    if trimmed.is_empty() || trimmed.len() > 40 {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.contains("education") {
        Some(SectionKind::Education)
    } else if lower.contains("experience") {
        Some(SectionKind::Experience)
    } else if lower.contains("project") {
        Some(SectionKind::Projects)
    } else if lower.contains("certification") {
        Some(SectionKind::Certifications)
    } else {
        None
    }
}

/// Rough heading-based section splitter used when the structured parse is
/// unusable. Leaves skills and domain empty — downstream stages degrade
/// with "no signal" rather than invented content.
fn fallback_sections(text: &str) -> StructuredParse {
    let mut sections = StructuredParse::default();
    let mut current: Option<SectionKind> = None;
    let mut block: Vec<&str> = Vec::new();

    let flush = |kind: Option<SectionKind>, block: &mut Vec<&str>, out: &mut StructuredParse| {
        if let Some(kind) = kind {
            let joined = block.join("\n").trim().to_string();
            if !joined.is_empty() {
                match kind {
                    SectionKind::Education => out.education.push(joined),
                    SectionKind::Experience => out.experience.push(joined),
                    SectionKind::Projects => out.projects.push(joined),
                    SectionKind::Certifications => out.certifications.push(joined),
                }
            }
        }
        block.clear();
    };

    for line in text.split('\n') {
        if let Some(kind) = heading_for(line) {
            flush(current, &mut block, &mut sections);
            current = Some(kind);
        } else if current.is_some() {
            block.push(line);
        }
    }
    flush(current, &mut block, &mut sections);

    sections
}
