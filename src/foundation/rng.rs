use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random source for effects.
///
/// Seeded from the engine seed and the lyric id so that a line replays identically after
/// `reset()`.
#[derive(Clone, Debug)]
pub struct FxRng(ChaCha8Rng);

impl FxRng {
    /// Seed directly.
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seed from an engine seed combined with a lyric id.
    pub fn for_line(seed: u64, lyric_id: &str) -> Self {
        Self::new(seed ^ xxhash_rust::xxh3::xxh3_64(lyric_id.as_bytes()))
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Uniform in `[-1, 1)`.
    pub fn signed(&mut self) -> f64 {
        self.unit() * 2.0 - 1.0
    }

    /// Uniform in `[lo, hi)`; returns `lo` for empty or inverted ranges.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if !(hi > lo) {
            return lo;
        }
        self.0.gen_range(lo..hi)
    }

    /// Uniform index in `[0, n)`; `0` when `n == 0`.
    pub fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.0.gen_range(0..n)
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}
