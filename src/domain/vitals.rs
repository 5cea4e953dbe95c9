//! Vital-sign inputs for sleep apnea risk scoring.
//!
//! Raw measurements arrive the way a clinician types them (height in
//! centimetres); [`VitalsInput::from_measurements`] normalizes them into the
//! canonical metric form the scoring engine consumes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Biological sex as reported on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("Unknown gender '{other}', expected male or female")),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Canonical vital signs for one assessment request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsInput {
    /// Age in years
    pub age: f64,

    pub gender: Gender,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Height in metres
    pub height_m: f64,

    /// Peripheral oxygen saturation (SpO2) in percent, 0-100
    pub oxygen_saturation: f64,

    /// Resting pulse in beats per minute
    pub pulse: f64,

    /// Systolic blood pressure in mmHg
    pub systolic_bp: f64,

    /// Diastolic blood pressure in mmHg
    pub diastolic_bp: f64,
}

/// Metrics derived from [`VitalsInput`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Body-mass index, kg/m², rounded to two decimals
    pub bmi: f64,
}

impl VitalsInput {
    /// Build vitals from intake-form units (height in centimetres).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_measurements(
        age: f64,
        gender: Gender,
        weight_kg: f64,
        height_cm: f64,
        oxygen_saturation: f64,
        pulse: f64,
        systolic_bp: f64,
        diastolic_bp: f64,
    ) -> Self {
        Self {
            age,
            gender,
            weight_kg,
            height_m: height_cm / 100.0,
            oxygen_saturation,
            pulse,
            systolic_bp,
            diastolic_bp,
        }
    }

    /// Compute the derived metrics used by the scoring engine.
    ///
    /// The result is undefined (infinite or NaN) for a zero height; callers
    /// are expected to run [`VitalsInput::validate`] first.
    #[must_use]
    pub fn derive(&self) -> DerivedMetrics {
        let bmi = self.weight_kg / (self.height_m * self.height_m);
        DerivedMetrics {
            bmi: round_to(bmi, 2),
        }
    }

    /// Validate that every measurement is a finite value in its physical range.
    ///
    /// The scoring engine itself never validates; this is for the caller
    /// sitting at the input boundary.
    ///
    /// # Errors
    /// Returns every violation found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let positive = [
            ("Age", self.age),
            ("Weight", self.weight_kg),
            ("Height", self.height_m),
            ("Pulse", self.pulse),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} {value} must be a positive number"));
            }
        }

        if !self.oxygen_saturation.is_finite() || !(0.0..=100.0).contains(&self.oxygen_saturation) {
            errors.push(format!(
                "Oxygen saturation {} out of range [0, 100]",
                self.oxygen_saturation
            ));
        }
        if !self.systolic_bp.is_finite() {
            errors.push(format!("Systolic BP {} is not a number", self.systolic_bp));
        }
        if !self.diastolic_bp.is_finite() {
            errors.push(format!("Diastolic BP {} is not a number", self.diastolic_bp));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VitalsInput {
        VitalsInput::from_measurements(52.0, Gender::Male, 98.0, 175.0, 93.0, 78.0, 138.0, 88.0)
    }

    #[test]
    fn test_height_normalized_to_metres() {
        let vitals = sample();
        assert!((vitals.height_m - 1.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmi_rounded_to_two_decimals() {
        // 98 / 1.75² = 32.0000
        let metrics = sample().derive();
        assert!((metrics.bmi - 32.0).abs() < 1e-9);

        let vitals = VitalsInput::from_measurements(30.0, Gender::Female, 61.3, 168.0, 98.0, 64.0, 118.0, 76.0);
        // 61.3 / 1.68² = 21.7191...
        assert!((vitals.derive().bmi - 21.72).abs() < 1e-9);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" f ".parse::<Gender>(), Ok(Gender::Female));
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(sample().validate().is_ok());

        let invalid = VitalsInput {
            age: 0.0,
            height_m: 0.0,
            oxygen_saturation: 104.0,
            ..sample()
        };
        let errors = invalid.validate().expect_err("Should reject");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validation_rejects_nan() {
        let invalid = VitalsInput {
            pulse: f64::NAN,
            ..sample()
        };
        assert!(invalid.validate().is_err());
    }
}
