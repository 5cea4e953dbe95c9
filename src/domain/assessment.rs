//! Risk assessment result types.
//!
//! Represents the output of the rule-based AHI estimator.

use serde::{Deserialize, Serialize};

/// Sleep apnea severity derived from the AHI estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// AHI below 5
    Normal,
    /// AHI 5-15
    Mild,
    /// AHI 15-30
    Moderate,
    /// AHI 30 and above
    Severe,
}

impl Severity {
    /// Ordinal code fed to the advice model.
    ///
    /// The code follows clinical ordering so that downstream models see a
    /// stable, monotone encoding across requests.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::Mild),
            2 => Some(Self::Moderate),
            3 => Some(Self::Severe),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Weight category derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightCategory {
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    #[serde(rename = "Mild Obesity")]
    MildObesity,
    #[serde(rename = "Moderate Obesity")]
    ModerateObesity,
    #[serde(rename = "Severe Obesity")]
    SevereObesity,
}

impl WeightCategory {
    /// Ordinal code fed to the advice model (Normal Weight = 0 … Severe Obesity = 4).
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::NormalWeight => 0,
            Self::Overweight => 1,
            Self::MildObesity => 2,
            Self::ModerateObesity => 3,
            Self::SevereObesity => 4,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NormalWeight),
            1 => Some(Self::Overweight),
            2 => Some(Self::MildObesity),
            3 => Some(Self::ModerateObesity),
            4 => Some(Self::SevereObesity),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NormalWeight => "Normal Weight",
            Self::Overweight => "Overweight",
            Self::MildObesity => "Mild Obesity",
            Self::ModerateObesity => "Moderate Obesity",
            Self::SevereObesity => "Severe Obesity",
        }
    }
}

impl std::fmt::Display for WeightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall sleep quality, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepQuality {
    Good,
    #[serde(rename = "Very Mild")]
    VeryMild,
    Mild,
    Moderate,
    #[serde(rename = "Moderately Poor")]
    ModeratelyPoor,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    #[serde(rename = "Extremely Poor")]
    ExtremelyPoor,
}

impl SleepQuality {
    /// All labels in descending order of quality.
    pub const ALL: [SleepQuality; 8] = [
        Self::Good,
        Self::VeryMild,
        Self::Mild,
        Self::Moderate,
        Self::ModeratelyPoor,
        Self::Poor,
        Self::VeryPoor,
        Self::ExtremelyPoor,
    ];

    /// Map a weighted sleep-quality total onto a label.
    #[must_use]
    pub fn from_total(total: f64) -> Self {
        if total >= 90.0 {
            Self::Good
        } else if total >= 80.0 {
            Self::VeryMild
        } else if total >= 70.0 {
            Self::Mild
        } else if total >= 60.0 {
            Self::Moderate
        } else if total >= 50.0 {
            Self::ModeratelyPoor
        } else if total >= 40.0 {
            Self::Poor
        } else if total >= 30.0 {
            Self::VeryPoor
        } else {
            Self::ExtremelyPoor
        }
    }

    /// Fixed display percentage for this label.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        match self {
            Self::ExtremelyPoor => 20,
            Self::VeryPoor => 40,
            Self::Poor => 50,
            Self::ModeratelyPoor => 60,
            Self::Moderate => 70,
            Self::Mild => 80,
            Self::VeryMild => 90,
            Self::Good => 100,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::VeryMild => "Very Mild",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::ModeratelyPoor => "Moderately Poor",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::ExtremelyPoor => "Extremely Poor",
        }
    }

    /// Parse a display label back into a [`SleepQuality`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.label() == label)
    }
}

/// Percentage for a free-form label; labels outside the fixed set map to 50.
#[must_use]
pub fn percentage_for_label(label: &str) -> u8 {
    SleepQuality::from_label(label).map_or(50, |q| q.percentage())
}

impl std::fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete risk assessment for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Estimated apnea-hypopnea index, 0-100, one decimal
    pub ahi: f64,

    pub severity: Severity,

    pub weight_category: WeightCategory,

    pub sleep_quality: SleepQuality,

    /// Display percentage bound to `sleep_quality`
    pub sleep_quality_percentage: u8,

    /// Doctor-style recommendation for the AHI tier
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_ordinal() {
        let severities = [Severity::Normal, Severity::Mild, Severity::Moderate, Severity::Severe];
        for (i, s) in severities.iter().enumerate() {
            assert_eq!(usize::from(s.code()), i);
            assert_eq!(Severity::from_code(s.code()), Some(*s));
        }
        assert_eq!(WeightCategory::SevereObesity.code(), 4);
        assert_eq!(WeightCategory::from_code(5), None);
    }

    #[test]
    fn test_sleep_quality_boundaries() {
        assert_eq!(SleepQuality::from_total(90.0), SleepQuality::Good);
        assert_eq!(SleepQuality::from_total(89.99), SleepQuality::VeryMild);
        assert_eq!(SleepQuality::from_total(30.0), SleepQuality::VeryPoor);
        assert_eq!(SleepQuality::from_total(29.99), SleepQuality::ExtremelyPoor);
        assert_eq!(SleepQuality::from_total(-15.0), SleepQuality::ExtremelyPoor);
        assert_eq!(SleepQuality::from_total(f64::NAN), SleepQuality::ExtremelyPoor);
    }

    #[test]
    fn test_percentage_table() {
        let expected = [100, 90, 80, 70, 60, 50, 40, 20];
        for (quality, pct) in SleepQuality::ALL.iter().zip(expected) {
            assert_eq!(quality.percentage(), pct);
            assert_eq!(percentage_for_label(quality.label()), pct);
        }
        assert_eq!(percentage_for_label("Excellent"), 50);
    }

    #[test]
    fn test_serde_uses_display_labels() {
        let json = serde_json::to_string(&WeightCategory::MildObesity).expect("Should serialize");
        assert_eq!(json, "\"Mild Obesity\"");
        let back: SleepQuality = serde_json::from_str("\"Moderately Poor\"").expect("Should parse");
        assert_eq!(back, SleepQuality::ModeratelyPoor);
    }
}
