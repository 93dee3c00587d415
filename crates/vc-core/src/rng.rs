//! Deterministic simulation RNG and the two draw primitives the model uses.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from `MobilityConfig::seed`.  Every
//! random decision (population shuffle, phase orderings, proposals, firings)
//! pulls from it in a fixed program order, so the same seed always replays
//! the same run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Select an index from the discrete distribution `probs` given a uniform
/// draw `r` in `[0, 1)`.
///
/// Builds the cumulative sums prefixed with 0 (`c[0] = 0`,
/// `c[i] = p[0] + … + p[i-1]`) and returns the greatest `i` with `c[i] < r`.
/// Zero-mass entries are skipped because the search keeps the greatest match.
///
/// `r == 0.0` matches nothing; index 0 is returned in that case.  Rounding
/// that leaves the total just short of `r` is capped at the last index.
pub fn inverse_cdf(probs: &[f64], r: f64) -> usize {
    let mut selected = 0;
    let mut cumulative = 0.0;
    for (i, p) in probs.iter().enumerate() {
        if cumulative >= r {
            break;
        }
        selected = i;
        cumulative += p;
    }
    selected
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.  Used only from the single-threaded step driver.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Bernoulli draw: `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Draw an index from `probs` by inverse-CDF sampling.
    #[inline]
    pub fn draw_index(&mut self, probs: &[f64]) -> usize {
        let r = self.uniform();
        inverse_cdf(probs, r)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
