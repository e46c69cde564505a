//! Effects plugin - particle spawning and playback.

use bevy::prelude::*;

use super::particles::{animate_particles, spawn_particles};
use crate::core::FrameSet;

/// Effects plugin - turns particle requests into short-lived sprites.
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_particles.in_set(FrameSet::Simulate))
            .add_systems(Update, spawn_particles.in_set(FrameSet::Effects));
    }
}
