//! Snore severity adapter.
//!
//! The snoring score comes from an external audio classifier. Whatever that
//! collaborator hands back (nothing, an error, a number) is folded into a
//! non-negative finite [`SnoreScore`] before it reaches the scoring engine.

use serde::{Deserialize, Serialize};

/// Non-negative snoring severity consumed by the AHI estimator.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnoreScore(f64);

impl SnoreScore {
    /// No snoring sample was provided.
    pub const ABSENT: SnoreScore = SnoreScore(0.0);

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Boundary wrapper around the external snore classifier.
pub struct SnoreSeverityAdapter;

impl SnoreSeverityAdapter {
    /// Resolve an optional external score; absent means 0.
    #[must_use]
    pub fn resolve(score: Option<f64>) -> SnoreScore {
        match score {
            None => SnoreScore::ABSENT,
            Some(value) if value.is_finite() && value >= 0.0 => SnoreScore(value),
            Some(value) => {
                tracing::warn!("Discarding invalid snore score {value}, using 0");
                SnoreScore::ABSENT
            }
        }
    }

    /// Resolve a fallible classification; a failed classifier counts as no snoring.
    #[must_use]
    pub fn resolve_result<E: std::fmt::Display>(result: Result<f64, E>) -> SnoreScore {
        match result {
            Ok(value) => Self::resolve(Some(value)),
            Err(e) => {
                tracing::warn!("Snore classification failed: {e}, using 0");
                SnoreScore::ABSENT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(SnoreSeverityAdapter::resolve(None), SnoreScore::ABSENT);
        assert!((SnoreSeverityAdapter::resolve(None).value()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_valid_score_passes_through() {
        let score = SnoreSeverityAdapter::resolve(Some(3.5));
        assert!((score.value() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_scores_fall_back() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(SnoreSeverityAdapter::resolve(Some(bad)), SnoreScore::ABSENT);
        }
    }

    #[test]
    fn test_failed_classification_falls_back() {
        let failed: Result<f64, String> = Err("feature extraction failed".to_string());
        assert_eq!(SnoreSeverityAdapter::resolve_result(failed), SnoreScore::ABSENT);

        let ok: Result<f64, String> = Ok(2.0);
        assert!((SnoreSeverityAdapter::resolve_result(ok).value() - 2.0).abs() < f64::EPSILON);
    }
}
