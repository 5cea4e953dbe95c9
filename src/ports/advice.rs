//! Advice model port: Trait for the learned nutrition & sleep advice model.
//!
//! The model itself lives outside this crate; the core only builds the
//! request and carries the returned text through untouched.

use serde::{Deserialize, Serialize};

use crate::domain::{Severity, WeightCategory};

/// Errors an advice model can report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdviceError {
    #[error("Advice model not loaded: {0}")]
    NotLoaded(String),

    #[error("No advice for severity code {severity_code}, weight code {weight_code}")]
    NoMatch { severity_code: u8, weight_code: u8 },

    #[error("Advice model failed: {0}")]
    Model(String),
}

/// Feature row handed to the advice model.
///
/// Categories are passed as fixed ordinal codes (see [`Severity::code`] and
/// [`WeightCategory::code`]), identical across requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub ahi: f64,
    pub bmi: f64,
    pub severity_code: u8,
    pub weight_code: u8,
}

impl AdviceRequest {
    #[must_use]
    pub fn new(ahi: f64, bmi: f64, severity: Severity, weight_category: WeightCategory) -> Self {
        Self {
            ahi,
            bmi,
            severity_code: severity.code(),
            weight_code: weight_category.code(),
        }
    }
}

/// Trait for personalized advice generation.
pub trait AdviceModel: Send + Sync {
    /// Produce advice text for one assessment.
    ///
    /// # Errors
    /// Returns `AdviceError` if the model is unavailable or has no answer.
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

impl<T: AdviceModel + ?Sized> AdviceModel for Box<T> {
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        (**self).advise(request)
    }
}
