use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::TrackId;

/// Source of uniform random draws for candidate picks
///
/// Draws need not be reproducible across requests or cryptographically strong.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&self, len: usize) -> usize;

    /// Picks one candidate uniformly, `None` when there are no candidates
    fn pick(&self, candidates: &[TrackId]) -> Option<TrackId> {
        if candidates.is_empty() {
            return None;
        }
        candidates.get(self.index(candidates.len())).copied()
    }
}

/// Draws from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Draws from a seeded RNG so a sequence of picks can be replayed
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_from_empty_candidates() {
        assert_eq!(ThreadRandom.pick(&[]), None);
    }

    #[test]
    fn test_pick_single_candidate() {
        assert_eq!(ThreadRandom.pick(&[42]), Some(42));
    }

    #[test]
    fn test_thread_random_stays_in_candidates() {
        let candidates = [101, 102, 103];
        for _ in 0..100 {
            let picked = ThreadRandom.pick(&candidates).unwrap();
            assert!(candidates.contains(&picked));
        }
    }

    #[test]
    fn test_seeded_random_replays() {
        let first = SeededRandom::new(17);
        let second = SeededRandom::new(17);
        let candidates: Vec<TrackId> = (0..1000).collect();

        let a: Vec<_> = (0..20).map(|_| first.pick(&candidates)).collect();
        let b: Vec<_> = (0..20).map(|_| second.pick(&candidates)).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_random_covers_all_candidates() {
        let source = SeededRandom::new(3);
        let candidates = [201, 202];
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(source.pick(&candidates).unwrap());
        }

        assert_eq!(seen.len(), 2);
    }
}
