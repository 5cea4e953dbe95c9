//! Rule-based sleep apnea scoring.
//!
//! Every function here is pure and total over finite inputs: no validation,
//! no failure modes. Breakpoints are inclusive on the side noted per factor.

use super::assessment::{Severity, SleepQuality, WeightCategory};
use super::vitals::round_to;

/// Weights applied to each AHI factor. They sum to 1.0.
const BMI_WEIGHT: f64 = 0.5;
const OXYGEN_WEIGHT: f64 = 0.3;
const SNORING_WEIGHT: f64 = 0.1;
const AGE_WEIGHT: f64 = 0.05;
const PULSE_WEIGHT: f64 = 0.05;

/// Multiplier converting the external snore score into AHI points.
const SNORE_MULTIPLIER: f64 = 1.5;

/// Strength of the diminishing-returns damping applied to the weighted sum.
const DAMPING: f64 = 0.1;

/// Upper bound of the AHI scale.
pub const AHI_MAX: f64 = 100.0;

/// Base AHI contribution from body-mass index.
#[must_use]
pub fn bmi_factor(bmi: f64) -> f64 {
    if bmi >= 40.0 {
        35.0
    } else if bmi >= 35.0 {
        25.0
    } else if bmi >= 30.0 {
        15.0
    } else if bmi >= 25.0 {
        8.0
    } else {
        3.0
    }
}

/// Desaturation penalty; lower SpO2 means a larger penalty.
#[must_use]
pub fn oxygen_factor(oxygen_saturation: f64) -> f64 {
    if oxygen_saturation < 90.0 {
        12.0
    } else if oxygen_saturation < 93.0 {
        8.0
    } else if oxygen_saturation < 95.0 {
        4.0
    } else {
        0.0
    }
}

#[must_use]
pub fn age_factor(age: f64) -> f64 {
    if age >= 60.0 {
        4.0
    } else if age >= 50.0 {
        2.0
    } else if age >= 40.0 {
        1.0
    } else {
        0.0
    }
}

#[must_use]
pub fn pulse_factor(pulse_rate: f64) -> f64 {
    if pulse_rate >= 90.0 {
        2.0
    } else if pulse_rate >= 80.0 {
        1.0
    } else {
        0.0
    }
}

/// Estimate the apnea-hypopnea index from vitals and the snore score.
///
/// Output is clamped to `[0, 100]` and rounded to one decimal.
#[must_use]
pub fn estimate_ahi(
    bmi: f64,
    oxygen_saturation: f64,
    snore_score: f64,
    age: f64,
    pulse_rate: f64,
) -> f64 {
    let base = bmi_factor(bmi);
    let oxygen = oxygen_factor(oxygen_saturation);
    let snoring = snore_score * SNORE_MULTIPLIER;
    let age_points = age_factor(age);
    let pulse = pulse_factor(pulse_rate);

    let weighted = base * BMI_WEIGHT
        + oxygen * OXYGEN_WEIGHT
        + snoring * SNORING_WEIGHT
        + age_points * AGE_WEIGHT
        + pulse * PULSE_WEIGHT;

    let damped = weighted * (1.0 - DAMPING * (weighted / AHI_MAX));

    tracing::debug!(
        base,
        oxygen,
        snoring,
        age = age_points,
        pulse,
        weighted,
        damped,
        "AHI factors"
    );

    round_to(damped.clamp(0.0, AHI_MAX), 1)
}

#[must_use]
pub fn classify_severity(ahi: f64) -> Severity {
    if ahi >= 30.0 {
        Severity::Severe
    } else if ahi >= 15.0 {
        Severity::Moderate
    } else if ahi >= 5.0 {
        Severity::Mild
    } else {
        Severity::Normal
    }
}

#[must_use]
pub fn classify_weight(bmi: f64) -> WeightCategory {
    if bmi >= 40.0 {
        WeightCategory::SevereObesity
    } else if bmi >= 35.0 {
        WeightCategory::ModerateObesity
    } else if bmi >= 30.0 {
        WeightCategory::MildObesity
    } else if bmi >= 25.0 {
        WeightCategory::Overweight
    } else {
        WeightCategory::NormalWeight
    }
}

/// Weighted 0-100 style sleep quality total.
///
/// The oxygen sub-score is deliberately left unclamped: SpO2 above 100 or
/// below 80 pushes it outside `[0, 100]`.
#[must_use]
pub fn sleep_quality_total(ahi: f64, snore_score: f64, oxygen_saturation: f64, pulse: f64) -> f64 {
    let ahi_score = (100.0 - ahi * 2.0).max(0.0);
    let snoring_score = (100.0 - snore_score * 10.0).max(0.0);
    let oxygen_score = (oxygen_saturation - 80.0) * 5.0;
    let pulse_score = (100.0 - (pulse - 60.0).abs() * 2.0).max(0.0);

    ahi_score * 0.4 + snoring_score * 0.3 + oxygen_score * 0.2 + pulse_score * 0.1
}

/// Sleep quality label and its display percentage.
#[must_use]
pub fn sleep_quality(
    ahi: f64,
    snore_score: f64,
    oxygen_saturation: f64,
    pulse: f64,
) -> (SleepQuality, u8) {
    let quality = SleepQuality::from_total(sleep_quality_total(ahi, snore_score, oxygen_saturation, pulse));
    (quality, quality.percentage())
}
