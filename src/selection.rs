//! Chance-weighted firing decisions.
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::peck::{MAX_CHANCE, PeckConfig};

/// Decides, once per peck per round, whether the peck fires.
///
/// The randomness source is owned by the selector. Seed it to make a run's fire
/// sequence reproducible.
#[derive(Clone, Debug)]
pub struct Selector<R = StdRng> {
    rng: R,
}

impl Selector<StdRng> {
    /// Creates a selector with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a selector seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Selector<R> {
    /// Creates a selector drawing from the given source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws `r` uniformly from `0..=100` and fires when `r <= chance`, or when
    /// `at_least_once` is set and the peck has no hit yet.
    ///
    /// A chance of 0 never fires on the draw alone. A draw is consumed on every call so
    /// the random sequence does not depend on hit counts.
    pub fn should_fire(&mut self, chance: u8, at_least_once: bool, hits: usize) -> bool {
        let r: u8 = self.rng.gen_range(0..=MAX_CHANCE);
        let drawn = chance > 0 && r <= chance;
        drawn || (at_least_once && hits == 0)
    }

    /// Shorthand for [`should_fire`](Self::should_fire) with a peck's config.
    pub fn decide(&mut self, config: &PeckConfig, hits: usize) -> bool {
        self.should_fire(config.chance, config.at_least_once, hits)
    }
}
