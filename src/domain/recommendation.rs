//! Doctor-style recommendation tiers keyed on the AHI estimate.

use serde::{Deserialize, Serialize};

/// Recommendation tier, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Urgent,
    Critical,
    Severe,
    HighRisk,
    ModerateRisk,
    Mild,
    Clear,
}

impl RecommendationTier {
    /// Select the tier for an AHI value. Total over all inputs; NaN maps to `Clear`.
    #[must_use]
    pub fn for_ahi(ahi: f64) -> Self {
        if ahi >= 30.0 {
            Self::Urgent
        } else if ahi >= 20.0 {
            Self::Critical
        } else if ahi >= 15.0 {
            Self::Severe
        } else if ahi >= 10.0 {
            Self::HighRisk
        } else if ahi >= 5.0 {
            Self::ModerateRisk
        } else if ahi >= 3.0 {
            Self::Mild
        } else {
            Self::Clear
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Urgent => "🚨 URGENT: Immediate specialist consultation required. Severe sleep apnea detected with high risk of complications.",
            Self::Critical => "⚠️ Critical: Severe condition detected. Medical intervention is necessary. Consider CPAP therapy.",
            Self::Severe => "⚠️ Severe: Strongly recommended to consult a sleep specialist. Lifestyle changes and medical treatment may be needed.",
            Self::HighRisk => "🔶 High Risk: Lifestyle changes & medical guidance suggested. Consider weight management and sleep position therapy.",
            Self::ModerateRisk => "🟡 Moderate Risk: Medical consultation advised. Focus on sleep hygiene and weight management.",
            Self::Mild => "🟢 Mild: Consider lifestyle changes & monitor symptoms. Maintain healthy sleep habits.",
            Self::Clear => "✅ No sleep apnea detected. Continue maintaining healthy sleep habits.",
        }
    }
}

/// Recommendation message for an AHI value.
#[must_use]
pub fn recommendation_for(ahi: f64) -> &'static str {
    RecommendationTier::for_ahi(ahi).message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_breakpoints() {
        let cases = [
            (45.0, RecommendationTier::Urgent),
            (30.0, RecommendationTier::Urgent),
            (29.9, RecommendationTier::Critical),
            (20.0, RecommendationTier::Critical),
            (15.0, RecommendationTier::Severe),
            (10.0, RecommendationTier::HighRisk),
            (5.0, RecommendationTier::ModerateRisk),
            (4.0, RecommendationTier::Mild),
            (3.0, RecommendationTier::Mild),
            (2.9, RecommendationTier::Clear),
            (0.0, RecommendationTier::Clear),
        ];
        for (ahi, tier) in cases {
            assert_eq!(RecommendationTier::for_ahi(ahi), tier, "ahi {ahi}");
        }
    }

    #[test]
    fn test_messages() {
        assert!(recommendation_for(4.0).contains("Mild"));
        assert!(recommendation_for(2.9).contains("No sleep apnea detected"));
        assert!(recommendation_for(20.9).contains("Consider CPAP therapy"));
    }
}
