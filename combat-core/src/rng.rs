//! Randomness seam for the resolvers.
//!
//! Every resolver takes its random source as an argument instead of reaching
//! for a global generator, so independent battles can run on separate
//! threads and tests can pin or script every draw.

use rand::{Rng, RngCore};

/// Source of uniform samples for combat rolls.
pub trait CombatRng {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[low, high)`, as `low + (high - low) * u`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Returns true with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p.clamp(0.0, 1.0)
    }
}

impl<R: RngCore + ?Sized> CombatRng for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
