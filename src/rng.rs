//! Random source for spin selection.
//!
//! Uses the `rand` crate with `SmallRng` (xoshiro256++), which is fast and
//! works under WASM. Entropy comes from `getrandom` (browser crypto API).
//! Not cryptographically secure, which is fine for a visual randomizer.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform `[0, 1)` source for the selector.
pub struct WheelRng {
    inner: SmallRng,
}

impl WheelRng {
    /// Create from system entropy (browser crypto.getRandomValues or OS).
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Create with a specific seed for deterministic replay.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Next float in `[0, 1)`.
    #[inline(always)]
    pub fn next_unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Borrow as the `FnMut() -> f64` shape the wheel controller takes.
    pub fn as_source(&mut self) -> impl FnMut() -> f64 + '_ {
        move || self.next_unit()
    }

    /// Consume into an owned `FnMut() -> f64` source.
    pub fn into_source(mut self) -> impl FnMut() -> f64 {
        move || self.next_unit()
    }
}

impl Default for WheelRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_deterministic() {
        let mut rng1 = WheelRng::from_seed(42);
        let mut rng2 = WheelRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(rng1.next_unit(), rng2.next_unit());
        }
    }

    #[test]
    fn test_unit_range_bounds() {
        let mut rng = WheelRng::from_seed(123);
        for _ in 0..10_000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_source_closure_draws_from_rng() {
        let mut expected = WheelRng::from_seed(7);
        let mut source = WheelRng::from_seed(7).into_source();
        for _ in 0..10 {
            assert_eq!(source(), expected.next_unit());
        }
    }
}
