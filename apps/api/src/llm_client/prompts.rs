// Cross-cutting prompt fragments shared by the pipeline stages.
// Each stage defines its own templates in pipeline/prompts.rs; this file
// holds only the fragments reused across stages.

/// Instruction appended to every stage that reads the candidate document:
/// claims must be textually supported, never inferred.
pub const FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: Do NOT assert experience, credentials, or skills that are not \
    textually supported by the provided material. If the material does not \
    support a claim, omit it entirely.";

/// Instruction appended to every stage that reads public search findings:
/// stick to public patterns, never proprietary content.
pub const PUBLIC_SIGNAL_INSTRUCTION: &str = "\
    CRITICAL: Use only publicly observable interview patterns from the \
    provided findings and user input. Do NOT guess or reconstruct \
    proprietary interview content.";

/// Replaces double quotes in user-supplied text before interpolation so a
/// stray quote cannot break the JSON examples embedded in the templates.
pub fn sanitize(text: &str) -> String {
    text.replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_double_quotes() {
        assert_eq!(sanitize(r#"said "hi" twice"#), "said 'hi' twice");
    }

    #[test]
    fn test_sanitize_leaves_clean_text_alone() {
        assert_eq!(sanitize("no quotes here"), "no quotes here");
    }
}
