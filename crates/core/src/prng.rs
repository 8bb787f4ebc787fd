//! The run's only source of randomness.
//!
//! One [`Xorshift64`] is created from `RenderConfig::seed` and handed by
//! `&mut` to each consumer in turn: three draws per mass, `len - 1` for the
//! palette shuffle, then per trajectory two for the start point and one for
//! its color. Keeping that order fixed is what makes a seed name an image.

use serde::{Deserialize, Serialize};

/// Xorshift64 (shifts 13, 7, 17) over a single `u64` of state.
///
/// Zero is a fixed point of the step, so seed 0 maps to [`Self::FALLBACK_SEED`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Starts a sequence at `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// One draw: steps the state and returns it.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// One draw mapped to `[0, 1)`: the top 53 bits over 2^53.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// One draw mapped to `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// One draw reduced modulo `max`.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Permutes `items` in place with a Fisher-Yates shuffle.
    ///
    /// Consumes exactly `items.len() - 1` draws (none for 0 or 1 items).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_usize(i + 1);
            items.swap(i, j);
        }
    }
}
