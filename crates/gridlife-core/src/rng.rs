//! Seeded random source shared by every stochastic decision in a world.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source owned by a single world.
///
/// Two sources built from the same seed produce the same stream.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[low, high]`
    pub fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        assert!(low <= high, "empty range [{low}, {high}]");
        self.rng.gen_range(low..=high)
    }

    /// Uniform count in `[low, high]`
    pub fn count_inclusive(&mut self, low: usize, high: usize) -> usize {
        assert!(low <= high, "empty range [{low}, {high}]");
        self.rng.gen_range(low..=high)
    }

    /// Uniform index in `[0, len)`
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range");
        self.rng.gen_range(0..len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomSource::new(42);
        let mut b = RandomSource::new(42);
        for _ in 0..100 {
            assert_eq!(a.range_inclusive(-5, 5), b.range_inclusive(-5, 5));
        }
    }

    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = RandomSource::new(1);
        let draws: Vec<i32> = (0..500).map(|_| rng.range_inclusive(-2, 2)).collect();
        assert!(draws.iter().all(|v| (-2..=2).contains(v)));
        assert!(draws.contains(&-2));
        assert!(draws.contains(&2));
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut rng = RandomSource::new(3);
        assert_eq!(rng.range_inclusive(4, 4), 4);
        assert_eq!(rng.count_inclusive(0, 0), 0);
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    #[should_panic]
    fn test_empty_index_range_panics() {
        RandomSource::new(0).index(0);
    }
}
