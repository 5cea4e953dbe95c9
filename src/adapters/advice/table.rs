//! JSON advice table.
//!
//! Maps (severity, weight category) to advice text, with severity-only rows
//! acting as a fallback when no exact row exists. The file format:
//!
//! ```json
//! {
//!   "entries": [
//!     { "severity": "Moderate", "weight_category": "Mild Obesity", "advice": "..." },
//!     { "severity": "Moderate", "advice": "..." }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Severity, WeightCategory};
use crate::ports::{AdviceError, AdviceModel, AdviceRequest};
use crate::SleepcheckError;

/// Maximum accepted table size. Advice tables are small hand-curated files.
const MAX_TABLE_BYTES: u64 = 1024 * 1024;

/// One row of the advice table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceEntry {
    pub severity: Severity,

    /// `None` applies to every weight category of this severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_category: Option<WeightCategory>,

    pub advice: String,
}

/// Lookup-table implementation of [`AdviceModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceTable {
    pub entries: Vec<AdviceEntry>,
}

impl AdviceTable {
    /// Parse a table from JSON text.
    ///
    /// # Errors
    /// Returns `SleepcheckError::Serialization` on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SleepcheckError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    /// Returns error if the file is unreadable, too large or malformed.
    pub fn load(path: &Path) -> Result<Self, SleepcheckError> {
        let size = std::fs::metadata(path)?.len();
        if size > MAX_TABLE_BYTES {
            return Err(SleepcheckError::Config(format!(
                "Advice table {} is {size} bytes, limit is {MAX_TABLE_BYTES}",
                path.display()
            )));
        }

        let table = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        tracing::info!(
            "Loaded advice table from {} ({} entries)",
            path.display(),
            table.entries.len()
        );
        Ok(table)
    }

    fn lookup(&self, severity: Severity, weight_category: WeightCategory) -> Option<&str> {
        let exact = self
            .entries
            .iter()
            .find(|e| e.severity == severity && e.weight_category == Some(weight_category));
        let fallback = || {
            self.entries
                .iter()
                .find(|e| e.severity == severity && e.weight_category.is_none())
        };
        exact.or_else(fallback).map(|e| e.advice.as_str())
    }
}

impl AdviceModel for AdviceTable {
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let no_match = || AdviceError::NoMatch {
            severity_code: request.severity_code,
            weight_code: request.weight_code,
        };

        let severity = Severity::from_code(request.severity_code).ok_or_else(no_match)?;
        let weight_category = WeightCategory::from_code(request.weight_code).ok_or_else(no_match)?;

        self.lookup(severity, weight_category)
            .map(str::to_string)
            .ok_or_else(no_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "entries": [
            { "severity": "Moderate", "weight_category": "Mild Obesity", "advice": "Lose 5-10% of body weight." },
            { "severity": "Moderate", "advice": "Sleep on your side." },
            { "severity": "Normal", "advice": "Keep a regular sleep schedule." }
        ]
    }"#;

    fn request(severity: Severity, weight: WeightCategory) -> AdviceRequest {
        AdviceRequest::new(10.0, 31.0, severity, weight)
    }

    #[test]
    fn test_exact_row_preferred() {
        let table = AdviceTable::from_json_str(SAMPLE).expect("Should parse");
        let advice = table
            .advise(&request(Severity::Moderate, WeightCategory::MildObesity))
            .expect("Should find advice");
        assert_eq!(advice, "Lose 5-10% of body weight.");
    }

    #[test]
    fn test_severity_fallback() {
        let table = AdviceTable::from_json_str(SAMPLE).expect("Should parse");
        let advice = table
            .advise(&request(Severity::Moderate, WeightCategory::Overweight))
            .expect("Should fall back");
        assert_eq!(advice, "Sleep on your side.");
    }

    #[test]
    fn test_missing_severity() {
        let table = AdviceTable::from_json_str(SAMPLE).expect("Should parse");
        let err = table
            .advise(&request(Severity::Severe, WeightCategory::SevereObesity))
            .expect_err("Should not match");
        assert!(matches!(err, AdviceError::NoMatch { severity_code: 3, weight_code: 4 }));
    }

    #[test]
    fn test_unknown_codes() {
        let table = AdviceTable::from_json_str(SAMPLE).expect("Should parse");
        let bad = AdviceRequest {
            ahi: 1.0,
            bmi: 20.0,
            severity_code: 9,
            weight_code: 0,
        };
        assert!(table.advise(&bad).is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = AdviceTable::from_json_str("{ \"entries\": [ { \"severity\": \"Extreme\" } ] }")
            .expect_err("Should reject");
        assert!(matches!(err, SleepcheckError::Serialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        file.write_all(SAMPLE.as_bytes()).expect("Should write");

        let table = AdviceTable::load(file.path()).expect("Should load");
        assert_eq!(table.entries.len(), 3);

        let missing = AdviceTable::load(Path::new("/nonexistent/advice.json"));
        assert!(matches!(missing, Err(SleepcheckError::Io(_))));
    }

    #[test]
    fn test_bundled_table_covers_every_severity() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/advice_table.json");
        let table = AdviceTable::load(&path).expect("Bundled table should load");

        for code in 0..=3 {
            for weight in 0..=4 {
                let request = AdviceRequest {
                    ahi: 10.0,
                    bmi: 30.0,
                    severity_code: code,
                    weight_code: weight,
                };
                assert!(table.advise(&request).is_ok(), "no advice for s{code} w{weight}");
            }
        }
    }
}
