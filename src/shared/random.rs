//! Source of the random draws made by the simulated parts of the app
//! (waste classification, severity score, community rank).
//!
//! Services take an `Arc<dyn RandomSource>` so tests can script the draws.

use rand::Rng;

pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;

    /// Uniform integer in `low..=high`.
    fn between(&self, low: u32, high: u32) -> u32;
}

/// Thread-local RNG backed source used in production
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn between(&self, low: u32, high: u32) -> u32 {
        rand::rng().random_range(low..=high)
    }
}

#[cfg(test)]
pub use scripted::ScriptedRandom;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_bounds() {
        let random = ThreadRandom;
        for _ in 0..1000 {
            let value = random.between(1, 10);
            assert!((1..=10).contains(&value));
            assert!(random.index(6) < 6);
        }
    }

    #[test]
    fn test_thread_random_degenerate_range() {
        assert_eq!(ThreadRandom.between(7, 7), 7);
        assert_eq!(ThreadRandom.index(1), 0);
    }

    #[test]
    fn test_scripted_random_cycles() {
        let random = ScriptedRandom::new([0, 5, 13]);
        assert_eq!(random.index(6), 0);
        assert_eq!(random.index(6), 5);
        assert_eq!(random.index(6), 1);
        // cycled back to the first value
        assert_eq!(random.between(1, 10), 1);
        assert_eq!(random.between(1, 10), 6);
    }
}
