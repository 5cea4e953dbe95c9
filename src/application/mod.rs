//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the two use cases: risk assessment and question answering.

mod assessment;
mod chat;

pub use assessment::{compute_risk_assessment, AssessmentReport, AssessmentService};
pub use chat::{ChatService, ResponseComposer};
