//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the scoring core and its collaborators (learned models, entropy).

mod advice;
mod choice;

pub use advice::{AdviceError, AdviceModel, AdviceRequest};
pub use choice::ChoiceSource;
