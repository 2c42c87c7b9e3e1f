// Prompt constants and builders for the two document-extraction passes.
// The normalizing pass groups and relabels; the verbatim pass must not
// touch a single character of the phrases it reports.

use crate::llm_client::prompts::sanitize;

pub const STRUCTURED_PARSE_TEMPERATURE: f32 = 0.1;
pub const EXACT_SKILLS_TEMPERATURE: f32 = 0.0;

/// System prompt for the normalizing structured parse.
pub const STRUCTURED_PARSE_SYSTEM: &str = "You are a precise resume parser. \
    You read one resume and produce a clean structured representation. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent experience, degrees, or skills not present in the text.";

const STRUCTURED_PARSE_TEMPLATE: &str = r#"Read the resume text below and extract a structured JSON representation.

Return a JSON object with this EXACT schema (no extra fields):
{
  "clean_text": "",
  "education": [],
  "experience": [],
  "projects": [],
  "certifications": [],
  "summary_points": [],
  "domain": "",
  "tech_clusters": [],
  "skills": []
}

Guidelines:
- "clean_text": a lightly cleaned plain-text version of the resume.
- "education": concise strings summarizing degrees, schools, years.
- "experience": concise strings summarizing roles, employers, durations, key impacts.
- "projects": concise descriptions of projects with tech stack and outcomes.
- "certifications": certifications, licenses, or notable courses.
- "summary_points": high-level bullet points capturing the candidate profile.
- "domain": exactly one of:
  "Software Engineering", "Data Engineering", "Data Science / ML",
  "Analytics / BI", "DevOps / Infra / SRE", "Product / Business / Other".
- "tech_clusters": grouped stacks, e.g. "Python + Pandas + SQL (data analytics)",
  "React + TypeScript (frontend)", "AWS Lambda + DynamoDB + S3 (cloud)".
- "skills": normalized skill names, e.g. "Python", "Apache Spark", "React".
- Only extract what is actually supported by the text.

RESUME TEXT:
{resume_text}"#;

/// System prompt for the verbatim exact-phrase pass.
pub const EXACT_SKILLS_SYSTEM: &str = "You are an exact skill extractor. \
    You report skill phrases character-for-character as they appear in the \
    source text. You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const EXACT_SKILLS_TEMPLATE: &str = r#"Read the resume text below and extract ALL technical skills, tools, libraries, frameworks, cloud services, databases, platforms, and languages.

Return them EXACTLY as written in the resume:
- Preserve capitalization (e.g. "Python", "AWS Lambda", "C++", "PyTorch").
- Preserve spaces and punctuation.

Do NOT:
- Normalize or reword skills.
- Add skills that are not present.
- Merge or group skills.
- Expand abbreviations.

Return a JSON object with this EXACT schema:
{
  "exact_skills": []
}

RESUME TEXT:
{resume_text}"#;

pub fn structured_parse_prompt(resume_text: &str) -> String {
    STRUCTURED_PARSE_TEMPLATE.replace("{resume_text}", &sanitize(resume_text))
}

pub fn exact_skills_prompt(resume_text: &str) -> String {
    EXACT_SKILLS_TEMPLATE.replace("{resume_text}", &sanitize(resume_text))
}
