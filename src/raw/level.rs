use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Draws node heights from a geometric distribution with `P = 0.5`, clamped
/// to `[1, max_level]`.
///
/// A height is `1 +` the number of consecutive low-order one bits in a random
/// `u64`. Each generator owns its RNG, so two lists built with the same seed
/// grow identical towers for identical operation sequences.
#[derive(Clone, Debug)]
pub(crate) struct LevelGenerator {
    max_level: usize,
    rng: SmallRng,
}

impl LevelGenerator {
    pub(crate) fn new(max_level: usize, seed: u64) -> Self {
        assert!(max_level >= 1, "`LevelGenerator::new()` - `max_level` must be at least 1!");
        Self {
            max_level,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn max_level(&self) -> usize {
        self.max_level
    }

    pub(crate) fn random_level(&mut self) -> usize {
        let bits = self.rng.next_u64();
        // Half of all draws stop at the base row.
        if bits & 1 == 0 {
            return 1;
        }
        let level = 1 + bits.trailing_ones() as usize;
        level.min(self.max_level)
    }
}
