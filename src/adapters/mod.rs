//! Adapters layer: Concrete implementations of ports and boundary wrappers.
//!
//! - `advice`: advice model wrapper and JSON lookup table
//! - `chacha`: ChaCha20 random choice source
//! - `snore`: external snore score normalization
//! - `sanitize`: PHI filtering for logs

pub mod advice;
pub mod chacha;
pub mod sanitize;
pub mod snore;

pub use advice::{AdviceAdapter, AdviceOutcome, AdviceTable, NoAdviceModel};
pub use chacha::ChaChaChoice;
pub use snore::{SnoreScore, SnoreSeverityAdapter};
