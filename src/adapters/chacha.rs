//! ChaCha adapter: Implementation of ChoiceSource.
//!
//! # Mutex Behavior
//!
//! The RNG sits behind a `Mutex` so one instance can serve concurrent chat
//! requests. A poisoned mutex is recovered: the generator state is still
//! valid after a panic elsewhere, and reply variety is not safety critical.

use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::ports::ChoiceSource;

/// ChaCha20-backed uniform index source.
pub struct ChaChaChoice {
    rng: Mutex<ChaCha20Rng>,
}

impl ChaChaChoice {
    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Deterministic source; the same seed yields the same reply sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for ChaChaChoice {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ChoiceSource for ChaChaChoice {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_in_range() {
        let source = ChaChaChoice::from_entropy();
        for len in 1..20 {
            assert!(source.pick(len) < len);
        }
        assert_eq!(source.pick(0), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = ChaChaChoice::seeded(42);
        let b = ChaChaChoice::seeded(42);
        let seq_a: Vec<usize> = (0..32).map(|_| a.pick(5)).collect();
        let seq_b: Vec<usize> = (0..32).map(|_| b.pick(5)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_all_indices_reachable() {
        let source = ChaChaChoice::seeded(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[source.pick(5)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
