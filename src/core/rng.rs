//! Shared random source for gameplay rolls.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random number generator used by every gameplay roll (grass variants,
/// leaf counts, flame jitter). Seedable so tests are deterministic.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}
