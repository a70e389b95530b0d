use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game_core::{Signal, SignalSource};

/// Uniform random signals, drawn independently with replacement.
///
/// Seed it for reproducible sequences; otherwise it is seeded from OS entropy.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl SignalSource for RandomSource {
    fn next_signal(&mut self) -> Signal {
        Signal::ALL[self.rng.gen_range(0..Signal::ALL.len())]
    }
}
