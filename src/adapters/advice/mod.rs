//! Advice adapters: Implementations of AdviceModel and the boundary wrapper.
//!
//! - `AdviceAdapter`: turns model failures into an `Unavailable` outcome
//! - `AdviceTable`: JSON lookup table standing in for the learned model
//! - `NoAdviceModel`: used when no model is configured

mod table;

use serde::{Deserialize, Serialize};

use crate::domain::{Severity, WeightCategory};
use crate::ports::{AdviceError, AdviceModel, AdviceRequest};

pub use table::{AdviceEntry, AdviceTable};

/// Result of asking the advice model, carried alongside the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdviceOutcome {
    Available { advice: String },
    Unavailable { reason: String },
}

impl AdviceOutcome {
    #[must_use]
    pub fn advice(&self) -> Option<&str> {
        match self {
            Self::Available { advice } => Some(advice),
            Self::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Advice model placeholder that always reports itself unloaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdviceModel;

impl AdviceModel for NoAdviceModel {
    fn advise(&self, _request: &AdviceRequest) -> Result<String, AdviceError> {
        Err(AdviceError::NotLoaded("no advice model configured".to_string()))
    }
}

/// Boundary wrapper that never lets an advice failure fail an assessment.
pub struct AdviceAdapter<M: AdviceModel> {
    model: M,
}

impl<M: AdviceModel> AdviceAdapter<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Ask the model for personalized advice.
    #[must_use]
    pub fn request(
        &self,
        ahi: f64,
        bmi: f64,
        severity: Severity,
        weight_category: WeightCategory,
    ) -> AdviceOutcome {
        let request = AdviceRequest::new(ahi, bmi, severity, weight_category);
        match self.model.advise(&request) {
            Ok(advice) => AdviceOutcome::Available { advice },
            Err(e) => {
                tracing::warn!("Advice unavailable: {e}");
                AdviceOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoModel;

    impl AdviceModel for EchoModel {
        fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
            Ok(format!("s{} w{}", request.severity_code, request.weight_code))
        }
    }

    #[test]
    fn test_codes_reach_model() {
        let adapter = AdviceAdapter::new(EchoModel);
        let outcome = adapter.request(20.9, 42.0, Severity::Moderate, WeightCategory::SevereObesity);
        assert_eq!(outcome.advice(), Some("s2 w4"));
    }

    #[test]
    fn test_failure_becomes_unavailable() {
        let adapter = AdviceAdapter::new(NoAdviceModel);
        let outcome = adapter.request(3.0, 22.0, Severity::Normal, WeightCategory::NormalWeight);
        assert!(!outcome.is_available());
        match outcome {
            AdviceOutcome::Unavailable { reason } => assert!(reason.contains("not loaded")),
            AdviceOutcome::Available { .. } => panic!("Should be unavailable"),
        }
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = AdviceOutcome::Available {
            advice: "Walk daily".to_string(),
        };
        let json = serde_json::to_value(&outcome).expect("Should serialize");
        assert_eq!(json["status"], "available");
        assert_eq!(json["advice"], "Walk daily");
    }
}
