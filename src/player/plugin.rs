//! Player plugin - input, actions, movement and upgrades.

use bevy::prelude::*;

use super::movement;
use super::upgrades::apply_upgrades;
use crate::core::PlayState;

/// Player plugin - handles player input, actions, movement and upgrades.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Set up movement systems
        movement::setup_movement_systems(app);

        // Upgrades are only bought from the pause overlay
        app.add_systems(Update, apply_upgrades.run_if(in_state(PlayState::Paused)));
    }
}
