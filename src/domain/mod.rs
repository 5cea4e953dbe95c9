//! Domain layer: Core types and scoring rules.
//!
//! Everything here is pure: no I/O, no clocks, no randomness. Randomness
//! and learned models enter through the ports layer.

mod assessment;
mod chat;
mod knowledge;
mod recommendation;
pub mod scoring;
mod vitals;

pub use assessment::{percentage_for_label, RiskAssessment, Severity, SleepQuality, WeightCategory};
pub use chat::{ChatQuery, ChatResponse, Intent, TopicClassifier, TopicMatch};
pub use knowledge::{KnowledgeBase, Topic};
pub use recommendation::{recommendation_for, RecommendationTier};
pub use vitals::{DerivedMetrics, Gender, VitalsInput};

pub(crate) use vitals::round_to;
