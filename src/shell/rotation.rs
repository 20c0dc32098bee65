//! Value Selector
//!
//! Picks the value exported for a variable with several candidate lines.
//! Every call samples independently; there is no round-robin offset.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

/// Chooses one candidate per call using an injected random source.
pub struct ValueSelector {
    rng: Box<dyn RngCore + Send>,
}

impl ValueSelector {
    pub fn new(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Selector seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic selector for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Returns a single candidate unchanged and samples uniformly otherwise.
    pub fn select<'a>(&mut self, candidates: &'a [String]) -> Option<&'a str> {
        match candidates {
            [] => None,
            [only] => Some(only.as_str()),
            many => many.choose(&mut *self.rng).map(String::as_str),
        }
    }
}

impl std::fmt::Debug for ValueSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSelector").finish_non_exhaustive()
    }
}
