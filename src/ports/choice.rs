//! Random choice port: Source of uniform indices for reply selection.

/// Picks an index uniformly from `0..len`.
///
/// Implementations must be safe to share between request handlers.
pub trait ChoiceSource: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}
