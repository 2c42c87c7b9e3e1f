// Prompt constants and typed builders for the four pipeline stages.
// Builders take the same structured inputs the stages hold (profiles,
// findings) and produce the instruction text, so schema and instruction
// stay co-located and testable without a live service call.

use crate::llm_client::prompts::{sanitize, FIDELITY_INSTRUCTION, PUBLIC_SIGNAL_INSTRUCTION};
use crate::pipeline::alignment::FitProfile;
use crate::pipeline::capability::CapabilityProfile;
use crate::pipeline::expectation::ExpectationProfile;
use crate::search::aggregator::Finding;

pub const EXPECTATION_TEMPERATURE: f32 = 0.2;
pub const CAPABILITY_TEMPERATURE: f32 = 0.2;
pub const ALIGNMENT_TEMPERATURE: f32 = 0.0;
pub const NARRATIVE_TEMPERATURE: f32 = 0.25;

// ────────────────────────────────────────────────────────────────────────────
// Expectation builder
// ────────────────────────────────────────────────────────────────────────────

pub const EXPECTATION_SYSTEM: &str = "You are a role-expectation analyst. \
    You build a realistic interview-expectation profile for an employer and \
    role from public interview patterns and review sources. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const EXPECTATION_TEMPLATE: &str = r#"Build a realistic role-expectation profile for the employer and role below, based ONLY on the public interview findings and the optional user-provided input.

EMPLOYER: {employer}
ROLE: {role}

PUBLIC INTERVIEW FINDINGS:
{findings}

USER INTERVIEW EXPERIENCE (optional):
{user_review}

USER INSIGHTS (optional):
{user_insight}

Return a JSON object with this EXACT schema (no extra fields):
{
  "rounds": [
    {
      "name": "",
      "description": "",
      "topics": [],
      "subrounds": [{"name": "", "description": "", "topics": []}]
    }
  ],
  "round_count": "",
  "difficulty": "",
  "required_skills": [],
  "nice_to_have_skills": [],
  "themes": [],
  "question_patterns": [],
  "liked_project_types": [],
  "education_expectations": [],
  "seniority_pattern": "",
  "summary": ""
}

Rules:
- {public_signal_instruction}
- Summarize ROUND BY ROUND (online assessment, coding, system design, behavioral, domain rounds), using subrounds for onsite breakdowns.
- "difficulty" is one of: Easy, Medium, Hard, Mixed — judged realistically from the findings.
- If the findings are empty, leave the corresponding fields empty rather than inventing patterns."#;

pub fn expectation_prompt(
    employer: &str,
    role: &str,
    findings: &[Finding],
    user_review: &str,
    user_insight: &str,
) -> String {
    EXPECTATION_TEMPLATE
        .replace("{employer}", employer)
        .replace("{role}", role)
        .replace("{findings}", &render_findings(findings))
        .replace("{user_review}", &sanitize(user_review))
        .replace("{user_insight}", &sanitize(user_insight))
        .replace("{public_signal_instruction}", PUBLIC_SIGNAL_INSTRUCTION)
}

/// Renders findings as one concatenated block retaining per-finding source
/// attribution, the form the expectation builder consumes.
fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No public findings were available.".to_string();
    }
    let mut block = String::new();
    for finding in findings {
        block.push_str(&format!(
            "[{}] {}\n{}\n\n",
            finding.source,
            sanitize(&finding.title),
            sanitize(&finding.snippet)
        ));
    }
    block
}

// ────────────────────────────────────────────────────────────────────────────
// Capability builder
// ────────────────────────────────────────────────────────────────────────────

pub const CAPABILITY_SYSTEM: &str = "You are a resume-reality analyst. \
    You read a resume and judge, directly and honestly, what it actually \
    demonstrates. This output is not user-facing; tone is handled later. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const CAPABILITY_TEMPLATE: &str = r#"Read the resume material below and infer the candidate's real domain, strengths, weaknesses, and signals.

DETECTED SKILLS:
{skills}

RESUME TEXT:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "domain": "",
  "strengths": [],
  "weaknesses": [],
  "tech_clusters": [],
  "project_signals": [],
  "seniority_signal": "",
  "missing_signals": []
}

Rules:
- "domain": exactly one of:
  "Software Engineering", "Data Engineering", "Data Science / ML",
  "Analytics / BI", "DevOps / Infra / SRE", "Product / Business / Other".
- "strengths": direct strengths, e.g. "Strong Python + SQL", "Hands-on Spark + Airflow".
- "weaknesses": direct weaknesses, e.g. "No evidence of system design", "Projects look academic".
- "tech_clusters": grouped stacks, e.g. "Python + SQL + Pandas", "Spark + Kafka".
- "project_signals": what the projects reveal (toy vs production, scale, ownership).
- "seniority_signal": e.g. "student / fresher", "junior", "mid-level", "senior".
- "missing_signals": gaps that would matter for most technical roles.
- {fidelity_instruction}"#;

pub fn capability_prompt(resume_text: &str, skills: &[String]) -> String {
    let skills_line = if skills.is_empty() {
        "Not provided.".to_string()
    } else {
        skills.join(", ")
    };
    CAPABILITY_TEMPLATE
        .replace("{skills}", &sanitize(&skills_line))
        .replace("{resume_text}", &sanitize(resume_text))
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
}

// ────────────────────────────────────────────────────────────────────────────
// Alignment scorer
// ────────────────────────────────────────────────────────────────────────────

pub const ALIGNMENT_SYSTEM: &str = "You are a fit-analysis engine. \
    You compare real role expectations with real resume capabilities and \
    produce a quantitative and qualitative alignment report. Be factual, \
    not friendly — tone is handled by a later stage. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const ALIGNMENT_TEMPLATE: &str = r#"Compare the role expectations with the resume capabilities below.

ROLE EXPECTATION PROFILE:
{expectation_json}

RESUME CAPABILITY PROFILE:
{capability_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "skill_match_score": 0,
  "seniority_fit": "",
  "domain_fit": "",
  "experience_fit": "",
  "project_fit": "",
  "matched_strengths": [],
  "mismatched_risks": [],
  "priority_gaps": [],
  "missing_requirements": [],
  "notes": [],
  "overall_score": 0
}

Rules:
- "skill_match_score": integer 0-100 based only on skill comparison.
- "seniority_fit": realistic match of resume seniority vs role expectations.
- "domain_fit": how the candidate's domain lines up with the role's domain.
- "experience_fit": whether experience level, duration, and impact patterns match.
- "project_fit": whether project themes match what the role rewards.
- "overall_score": overall normalized fit, integer 0-100.
- "notes": short factual observations, including confidence caveats when
  either input profile is sparse or empty.
- This is a pure comparison: do NOT introduce any skill claim that is absent
  from the resume capability profile, and do NOT guess missing skills."#;

pub fn alignment_prompt(
    expectation: &ExpectationProfile,
    capability: &CapabilityProfile,
) -> Result<String, serde_json::Error> {
    Ok(ALIGNMENT_TEMPLATE
        .replace(
            "{expectation_json}",
            &serde_json::to_string_pretty(expectation)?,
        )
        .replace(
            "{capability_json}",
            &serde_json::to_string_pretty(capability)?,
        ))
}

// ────────────────────────────────────────────────────────────────────────────
// Narrative composer
// ────────────────────────────────────────────────────────────────────────────

pub const NARRATIVE_SYSTEM: &str = "You are a supportive career mentor. \
    You turn raw role, resume, and fit data into a warm, easy-to-read \
    analysis, grounded ONLY in the data provided. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const NARRATIVE_TEMPLATE: &str = r#"Write the user-facing report for the analysis below.

EMPLOYER: {employer}
ROLE: {role}

ROLE EXPECTATION PROFILE:
{expectation_json}

RESUME CAPABILITY PROFILE:
{capability_json}

FIT PROFILE:
{fit_json}

USER INTERVIEW REVIEW (optional):
{user_review}

USER INSIGHT (optional):
{user_insight}

Return a JSON object with this EXACT schema (no extra fields):
{
  "intro": "",
  "summary": "",
  "expectations_explained": "",
  "strengths_explained": "",
  "gaps_explained": "",
  "fit_explained": "",
  "action_plan": {
    "quick_wins": [],
    "four_week_plan": [],
    "resume_fixes": [],
    "project_ideas": []
  },
  "round_breakdown": [
    {
      "name": "",
      "round_type": "",
      "difficulty": "",
      "focus_points": [],
      "concepts": [],
      "question_patterns": [],
      "example_themes": [],
      "tips": []
    }
  ]
}

Content rules:
- "intro": a short, warm welcome that names the employer and role.
- "summary": blend what the public findings say with what the resume shows;
  when the expectation profile is empty, say plainly that little public
  signal was available.
- "expectations_explained": typical rounds, expected skills, behavioral and
  seniority expectations, drawn from the expectation profile.
- "strengths_explained": positive matches — skills and projects that line up.
  Be warm and encouraging.
- "gaps_explained": missing skills, project types, and seniority signals,
  phrased gently ("You might want to...", "It could help to...").
- "fit_explained": translate the fit profile into plain English — domain fit,
  seniority fit, skill match, major risks, overall conclusion. Reference the
  overall score and category, but explain what they mean rather than dumping
  numbers. If the fit category is Unknown, say the fit could not be assessed
  and explain what that means for the reader.
- "action_plan.quick_wins": things realistically done in 1-7 days.
- "action_plan.four_week_plan": a concrete 4-week roadmap.
- "action_plan.resume_fixes": specific bullet-level rewrite ideas.
- "action_plan.project_ideas": 3-6 project ideas aligned with the role.
- "round_breakdown": the most likely rounds, each with "difficulty" as one of
  "easy", "medium", "hard", "mixed"; question_patterns are generalized (e.g.
  "implement a data structure"); example_themes are realistic but
  non-proprietary.

Do NOT:
- Output raw JSON dumps inside any prose field.
- Copy large chunks of the profiles verbatim.
- Invent technologies not present in the profiles above."#;

#[allow(clippy::too_many_arguments)]
pub fn narrative_prompt(
    employer: &str,
    role: &str,
    expectation: &ExpectationProfile,
    capability: &CapabilityProfile,
    fit: &FitProfile,
    user_review: &str,
    user_insight: &str,
) -> Result<String, serde_json::Error> {
    Ok(NARRATIVE_TEMPLATE
        .replace("{employer}", employer)
        .replace("{role}", role)
        .replace(
            "{expectation_json}",
            &serde_json::to_string_pretty(expectation)?,
        )
        .replace(
            "{capability_json}",
            &serde_json::to_string_pretty(capability)?,
        )
        .replace("{fit_json}", &serde_json::to_string_pretty(fit)?)
        .replace("{user_review}", &sanitize(user_review))
        .replace("{user_insight}", &sanitize(user_insight)))
}
