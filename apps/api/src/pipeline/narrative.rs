//! Narrative Composer — the final stage. Takes the three profiles (and
//! optional user text) and produces the user-facing report: explanatory
//! prose, a time-boxed action plan, and a per-round interview breakdown.
//!
//! The prose must reference only facts present in the upstream profiles —
//! enforced at the instruction level, since the generation service is the
//! sole text source. Missing keys are backfilled with typed defaults so
//! consumers never index into an absent field.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::GenerationService;
use crate::pipeline::alignment::FitProfile;
use crate::pipeline::capability::CapabilityProfile;
use crate::pipeline::expectation::ExpectationProfile;
use crate::pipeline::{profile_or_default, prompts};

/// Difficulty label for one interview round. Anything the model invents
/// outside the fixed set collapses to `Mixed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundDifficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(other)]
    Mixed,
}

/// Time-boxed preparation plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPlan {
    /// Realistic 1-7 day items.
    #[serde(default)]
    pub quick_wins: Vec<String>,
    #[serde(default)]
    pub four_week_plan: Vec<String>,
    /// Bullet-level resume rewrite suggestions.
    #[serde(default)]
    pub resume_fixes: Vec<String>,
    /// 3-6 project ideas aligned with what the role rewards.
    #[serde(default)]
    pub project_ideas: Vec<String>,
}

/// One entry of the round-by-round interview breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundBreakdown {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub round_type: String,
    #[serde(default)]
    pub difficulty: RoundDifficulty,
    #[serde(default)]
    pub focus_points: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub question_patterns: Vec<String>,
    #[serde(default)]
    pub example_themes: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// The user-facing synthesis of the three upstream profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeReport {
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub expectations_explained: String,
    #[serde(default)]
    pub strengths_explained: String,
    #[serde(default)]
    pub gaps_explained: String,
    #[serde(default)]
    pub fit_explained: String,
    #[serde(default)]
    pub action_plan: ActionPlan,
    #[serde(default)]
    pub round_breakdown: Vec<RoundBreakdown>,
}

/// Composes the final report. Runs even when upstream stages degraded to
/// defaults — the instruction tells the model to explain limitations in
/// that case rather than invent substance.
#[allow(clippy::too_many_arguments)]
pub async fn compose_report(
    llm: &dyn GenerationService,
    employer: &str,
    role: &str,
    expectation: &ExpectationProfile,
    capability: &CapabilityProfile,
    fit: &FitProfile,
    user_review: &str,
    user_insight: &str,
) -> NarrativeReport {
    let prompt = match prompts::narrative_prompt(
        employer,
        role,
        expectation,
        capability,
        fit,
        user_review,
        user_insight,
    ) {
        Ok(prompt) => prompt,
        Err(e) => {
            tracing::warn!("failed to serialize profiles for narrative, degrading to defaults: {e}");
            return NarrativeReport::default();
        }
    };

    let report: NarrativeReport = profile_or_default(
        llm,
        &prompt,
        prompts::NARRATIVE_SYSTEM,
        prompts::NARRATIVE_TEMPERATURE,
        "narrative composer",
    )
    .await;

    info!(
        "narrative composed: {} rounds in breakdown, {} quick wins",
        report.round_breakdown.len(),
        report.action_plan.quick_wins.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGeneration;
    use serde_json::json;

    #[test]
    fn test_difficulty_parses_fixed_set() {
        assert_eq!(
            serde_json::from_str::<RoundDifficulty>(r#""easy""#).unwrap(),
            RoundDifficulty::Easy
        );
        assert_eq!(
            serde_json::from_str::<RoundDifficulty>(r#""hard""#).unwrap(),
            RoundDifficulty::Hard
        );
        assert_eq!(
            serde_json::from_str::<RoundDifficulty>(r#""mixed""#).unwrap(),
            RoundDifficulty::Mixed
        );
    }

    #[test]
    fn test_unknown_difficulty_collapses_to_mixed() {
        assert_eq!(
            serde_json::from_str::<RoundDifficulty>(r#""brutal""#).unwrap(),
            RoundDifficulty::Mixed
        );
    }

    #[test]
    fn test_empty_object_yields_complete_defaults() {
        let report: NarrativeReport = serde_json::from_str("{}").unwrap();
        assert!(report.intro.is_empty());
        assert!(report.action_plan.quick_wins.is_empty());
        assert!(report.round_breakdown.is_empty());
    }

    #[test]
    fn test_missing_action_plan_keys_backfill() {
        let report: NarrativeReport = serde_json::from_value(json!({
            "intro": "Welcome!",
            "action_plan": {"quick_wins": ["Polish the summary section"]}
        }))
        .unwrap();
        assert_eq!(report.intro, "Welcome!");
        assert_eq!(report.action_plan.quick_wins.len(), 1);
        assert!(report.action_plan.four_week_plan.is_empty());
        assert!(report.action_plan.project_ideas.is_empty());
    }

    #[tokio::test]
    async fn test_well_formed_report_round_trips() {
        let llm = ScriptedGeneration::new(vec![Ok(json!({
            "intro": "Let's walk through what we found.",
            "summary": "Based on public interview reviews, the loop is coding-heavy.",
            "fit_explained": "Your skill match is moderate.",
            "action_plan": {
                "quick_wins": ["Refresh graph traversal"],
                "four_week_plan": ["Week 1: arrays and strings"],
                "resume_fixes": ["Quantify the API latency win"],
                "project_ideas": ["Build a rate limiter", "Event log metrics", "URL shortener"]
            },
            "round_breakdown": [{
                "name": "Online Assessment - DSA",
                "round_type": "DSA",
                "difficulty": "medium",
                "focus_points": ["speed and correctness"],
                "concepts": ["arrays", "hash maps"],
                "question_patterns": ["implement a data structure"],
                "example_themes": ["compute metrics from event logs"],
                "tips": ["clarify constraints before coding"]
            }]
        }))]);

        let report = compose_report(
            &llm,
            "Acme",
            "Backend Engineer",
            &ExpectationProfile::default(),
            &CapabilityProfile::default(),
            &FitProfile::default(),
            "",
            "",
        )
        .await;

        assert!(!report.intro.is_empty());
        assert_eq!(report.round_breakdown.len(), 1);
        assert_eq!(report.round_breakdown[0].difficulty, RoundDifficulty::Medium);
        assert_eq!(report.action_plan.project_ideas.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_output_degrades_to_empty_report() {
        let llm = ScriptedGeneration::new(vec![Err(ScriptedGeneration::parse_error())]);

        let report = compose_report(
            &llm,
            "Acme",
            "Backend Engineer",
            &ExpectationProfile::default(),
            &CapabilityProfile::default(),
            &FitProfile::default(),
            "",
            "",
        )
        .await;

        assert!(report.intro.is_empty());
        assert!(report.round_breakdown.is_empty());
    }
}
