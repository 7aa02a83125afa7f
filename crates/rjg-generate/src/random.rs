use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws used by every random directive.
///
/// Implemented for all [`RngCore`] generators, so the thread generator and
/// seeded generators are interchangeable.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`. Callers guarantee `min <= max`.
    fn int_between(&mut self, min: i64, max: i64) -> i64;

    /// Uniform index in `[0, len)`. Callers guarantee `len > 0`.
    fn index_below(&mut self, len: usize) -> usize;

    /// Uniform boolean.
    fn coin(&mut self) -> bool;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn int_between(&mut self, min: i64, max: i64) -> i64 {
        self.random_range(min..=max)
    }

    fn index_below(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Seeded generator for reproducible runs.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
