//! Assessment service: Turns vitals into a sleep apnea risk report.
//!
//! This service coordinates:
//! - Vitals normalization (BMI)
//! - AHI estimation and grading
//! - Recommendation selection
//! - The external advice model lookup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::{AdviceAdapter, AdviceOutcome, SnoreScore};
use crate::domain::scoring::{classify_severity, classify_weight, estimate_ahi, sleep_quality};
use crate::domain::{recommendation_for, round_to, Gender, RiskAssessment, VitalsInput};
use crate::ports::AdviceModel;
use crate::SleepcheckError;

/// Score one set of vitals. Pure and total over finite inputs.
#[must_use]
pub fn compute_risk_assessment(vitals: &VitalsInput, snore: SnoreScore) -> RiskAssessment {
    let metrics = vitals.derive();
    let snore_score = snore.value();

    let ahi = estimate_ahi(
        metrics.bmi,
        vitals.oxygen_saturation,
        snore_score,
        vitals.age,
        vitals.pulse,
    );
    let severity = classify_severity(ahi);
    let weight_category = classify_weight(metrics.bmi);
    let (quality, percentage) = sleep_quality(ahi, snore_score, vitals.oxygen_saturation, vitals.pulse);

    RiskAssessment {
        ahi,
        severity,
        weight_category,
        sleep_quality: quality,
        sleep_quality_percentage: percentage,
        recommendation: recommendation_for(ahi).to_string(),
    }
}

/// Everything shown to the user after an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessed_at: DateTime<Utc>,

    #[serde(flatten)]
    pub assessment: RiskAssessment,

    /// BMI rounded to one decimal for display
    pub bmi: f64,

    /// Snore score rounded to one decimal for display
    pub snore_score: f64,

    pub age: f64,
    pub gender: Gender,
    pub oxygen_saturation: f64,
    pub pulse: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,

    pub advice: AdviceOutcome,
}

impl AssessmentReport {
    /// Advice text, for callers that treat missing advice as fatal.
    ///
    /// # Errors
    /// Returns `SleepcheckError::AdviceUnavailable` with the model's reason.
    pub fn require_advice(&self) -> Result<&str, SleepcheckError> {
        match &self.advice {
            AdviceOutcome::Available { advice } => Ok(advice),
            AdviceOutcome::Unavailable { reason } => Err(SleepcheckError::AdviceUnavailable(reason.clone())),
        }
    }
}

/// Service producing full assessment reports.
pub struct AssessmentService<M: AdviceModel> {
    advice: AdviceAdapter<M>,
}

impl<M: AdviceModel> AssessmentService<M> {
    /// Create a new assessment service around an advice model.
    pub fn new(model: M) -> Self {
        Self {
            advice: AdviceAdapter::new(model),
        }
    }

    /// Run the full assessment pipeline.
    ///
    /// Never fails: an advice model error is reported inside the report as
    /// [`AdviceOutcome::Unavailable`].
    #[must_use]
    pub fn assess(&self, vitals: &VitalsInput, snore: SnoreScore) -> AssessmentReport {
        let metrics = vitals.derive();
        let assessment = compute_risk_assessment(vitals, snore);

        tracing::info!(
            "Assessment complete: ahi={:.1}, severity={}, weight={}, sleep_quality={}",
            assessment.ahi,
            assessment.severity,
            assessment.weight_category,
            assessment.sleep_quality
        );

        let advice = self.advice.request(
            assessment.ahi,
            metrics.bmi,
            assessment.severity,
            assessment.weight_category,
        );

        AssessmentReport {
            assessed_at: Utc::now(),
            bmi: round_to(metrics.bmi, 1),
            snore_score: round_to(snore.value(), 1),
            age: vitals.age,
            gender: vitals.gender,
            oxygen_saturation: vitals.oxygen_saturation,
            pulse: vitals.pulse,
            systolic_bp: vitals.systolic_bp,
            diastolic_bp: vitals.diastolic_bp,
            assessment,
            advice,
        }
    }

    /// Validate the vitals, then run [`Self::assess`].
    ///
    /// # Errors
    /// Returns `SleepcheckError::Validation` listing every rejected field.
    pub fn assess_checked(&self, vitals: &VitalsInput, snore: SnoreScore) -> Result<AssessmentReport, SleepcheckError> {
        vitals
            .validate()
            .map_err(|errors| SleepcheckError::Validation(errors.join("; ")))?;
        Ok(self.assess(vitals, snore))
    }
}
