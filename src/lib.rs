//! # Sleepcheck
//!
//! Obstructive sleep apnea risk screening from vital signs, plus a canned
//! knowledge responder for sleep apnea questions.
//!
//! This crate provides:
//! - A rule-based AHI estimator with severity, weight and sleep-quality grading
//! - Keyword topic classification over a fixed knowledge base
//! - Boundary adapters for the external snore classifier and advice model
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Vitals, assessment types, scoring rules, knowledge base
//! - `ports`: Trait definitions for collaborators (advice model, randomness)
//! - `adapters`: Concrete implementations (advice table, ChaCha RNG, log redaction)
//! - `application`: Use cases composing domain and ports
//! - `config`: Environment-driven runtime settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{AdviceOutcome, SnoreScore, SnoreSeverityAdapter};
pub use application::{compute_risk_assessment, AssessmentReport, AssessmentService, ChatService};
pub use domain::{ChatQuery, ChatResponse, RiskAssessment, Severity, VitalsInput, WeightCategory};

/// Result type for Sleepcheck operations
pub type Result<T> = std::result::Result<T, SleepcheckError>;

/// Main error type for Sleepcheck
#[derive(Debug, thiserror::Error)]
pub enum SleepcheckError {
    #[error("Invalid vitals: {0}")]
    Validation(String),

    #[error("Advice unavailable: {0}")]
    AdviceUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
