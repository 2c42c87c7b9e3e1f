//! Alignment Scorer — compares the expectation and capability profiles and
//! produces the quantitative fit assessment.
//!
//! This is a pure comparison, not a second extraction: the instruction
//! forbids introducing skill claims absent from the capability profile.
//! Scores are clamped into [0, 100] in code, and the category is recomputed
//! from the clamped overall score so the mapping is monotonic regardless of
//! what the model labeled it.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::llm_client::GenerationService;
use crate::pipeline::capability::CapabilityProfile;
use crate::pipeline::expectation::ExpectationProfile;
use crate::pipeline::{prompts, try_profile};

/// Five ordered fit bands, plus the placeholder used when the scorer's
/// output was unusable and the true fit is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitCategory {
    #[serde(rename = "Excellent Fit")]
    Excellent,
    #[serde(rename = "Strong Fit")]
    Strong,
    #[serde(rename = "Moderate Fit")]
    Moderate,
    #[serde(rename = "Weak Fit")]
    Weak,
    Misaligned,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FitCategory {
    /// Score-to-category thresholds. Policy choice, documented in DESIGN.md:
    /// 85+ Excellent, 70+ Strong, 50+ Moderate, 30+ Weak, below 30 Misaligned.
    pub fn from_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => FitCategory::Excellent,
            70..=84 => FitCategory::Strong,
            50..=69 => FitCategory::Moderate,
            30..=49 => FitCategory::Weak,
            _ => FitCategory::Misaligned,
        }
    }
}

/// Structured comparison between an expectation and a capability profile.
/// The default profile (score 0, category Unknown) is the malformed-output
/// fallback — it signals "unknown", never "bad candidate".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitProfile {
    #[serde(default, deserialize_with = "de_score")]
    pub skill_match_score: u8,
    #[serde(default)]
    pub seniority_fit: String,
    #[serde(default)]
    pub domain_fit: String,
    #[serde(default)]
    pub experience_fit: String,
    #[serde(default)]
    pub project_fit: String,
    #[serde(default)]
    pub matched_strengths: Vec<String>,
    #[serde(default)]
    pub mismatched_risks: Vec<String>,
    #[serde(default)]
    pub priority_gaps: Vec<String>,
    #[serde(default)]
    pub missing_requirements: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub category: FitCategory,
    #[serde(default, deserialize_with = "de_score")]
    pub overall_score: u8,
}

/// Accepts any JSON number for a score and clamps it into [0, 100], so an
/// out-of-range or fractional score degrades the value, not the profile.
fn de_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

/// Scores the alignment between the two profiles.
/// Malformed output degrades to the zero-score Unknown profile.
pub async fn score_alignment(
    llm: &dyn GenerationService,
    expectation: &ExpectationProfile,
    capability: &CapabilityProfile,
) -> FitProfile {
    let prompt = match prompts::alignment_prompt(expectation, capability) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("failed to serialize profiles for alignment, degrading to defaults: {e}");
            return FitProfile::default();
        }
    };

    let fit = match try_profile::<FitProfile>(
        llm,
        &prompt,
        prompts::ALIGNMENT_SYSTEM,
        prompts::ALIGNMENT_TEMPERATURE,
        "alignment scorer",
    )
    .await
    {
        Some(mut fit) => {
            // The category is derived, never trusted from the model.
            fit.category = FitCategory::from_score(fit.overall_score);
            fit
        }
        None => FitProfile::default(),
    };

    info!(
        "alignment scored: overall={}/100, skill_match={}/100, category={:?}",
        fit.overall_score, fit.skill_match_score, fit.category
    );

    fit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGeneration;
    use serde_json::json;

    fn rank(category: FitCategory) -> u8 {
        match category {
            FitCategory::Misaligned => 0,
            FitCategory::Weak => 1,
            FitCategory::Moderate => 2,
            FitCategory::Strong => 3,
            FitCategory::Excellent => 4,
            FitCategory::Unknown => unreachable!("from_score never yields Unknown"),
        }
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(FitCategory::from_score(100), FitCategory::Excellent);
        assert_eq!(FitCategory::from_score(85), FitCategory::Excellent);
        assert_eq!(FitCategory::from_score(84), FitCategory::Strong);
        assert_eq!(FitCategory::from_score(70), FitCategory::Strong);
        assert_eq!(FitCategory::from_score(69), FitCategory::Moderate);
        assert_eq!(FitCategory::from_score(50), FitCategory::Moderate);
        assert_eq!(FitCategory::from_score(49), FitCategory::Weak);
        assert_eq!(FitCategory::from_score(30), FitCategory::Weak);
        assert_eq!(FitCategory::from_score(29), FitCategory::Misaligned);
        assert_eq!(FitCategory::from_score(0), FitCategory::Misaligned);
    }

    #[test]
    fn test_category_is_monotonic_in_score() {
        let mut previous = rank(FitCategory::from_score(0));
        for score in 1..=100u8 {
            let current = rank(FitCategory::from_score(score));
            assert!(
                current >= previous,
                "category rank dropped between {} and {}",
                score - 1,
                score
            );
            previous = current;
        }
    }

    #[test]
    fn test_scores_clamp_into_bounds() {
        let fit: FitProfile = serde_json::from_value(json!({
            "skill_match_score": 180,
            "overall_score": -12
        }))
        .unwrap();
        assert_eq!(fit.skill_match_score, 100);
        assert_eq!(fit.overall_score, 0);
    }

    #[test]
    fn test_fractional_score_rounds() {
        let fit: FitProfile = serde_json::from_value(json!({"overall_score": 72.6})).unwrap();
        assert_eq!(fit.overall_score, 73);
    }

    #[test]
    fn test_default_profile_signals_unknown() {
        let fit = FitProfile::default();
        assert_eq!(fit.overall_score, 0);
        assert_eq!(fit.skill_match_score, 0);
        assert_eq!(fit.category, FitCategory::Unknown);
    }

    #[tokio::test]
    async fn test_category_recomputed_from_score() {
        // The model claims "Excellent Fit" but the score says Moderate.
        let llm = ScriptedGeneration::new(vec![Ok(json!({
            "skill_match_score": 60,
            "overall_score": 55,
            "category": "Excellent Fit",
            "matched_strengths": ["Python"],
            "priority_gaps": ["system design"]
        }))]);

        let fit = score_alignment(
            &llm,
            &ExpectationProfile::default(),
            &CapabilityProfile::default(),
        )
        .await;

        assert_eq!(fit.overall_score, 55);
        assert_eq!(fit.category, FitCategory::Moderate);
        assert_eq!(fit.matched_strengths, vec!["Python"]);
    }

    #[tokio::test]
    async fn test_malformed_output_degrades_to_unknown() {
        let llm = ScriptedGeneration::new(vec![Err(ScriptedGeneration::parse_error())]);

        let fit = score_alignment(
            &llm,
            &ExpectationProfile::default(),
            &CapabilityProfile::default(),
        )
        .await;

        assert_eq!(fit.overall_score, 0);
        assert_eq!(fit.category, FitCategory::Unknown);
        assert!(fit.priority_gaps.is_empty());
    }
}
