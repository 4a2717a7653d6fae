//! Session randomness
//!
//! One seeded generator per simulation. A fixed seed makes a whole session
//! reproducible: spawn positions, shoot timers, and particle spread.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator type owned by the simulation.
pub type GameRng = StdRng;

/// Seeded generator when `seed` is set, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> GameRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform sample in `[low, high)`; collapses to `low` for an empty range.
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}
