//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use crate::combat::{apply_enemy_damage, grant_experience};
use crate::core::FrameSet;

/// Enemy plugin - handles enemy AI, movement and death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            // AI runs against the player after the player has moved
            .add_systems(
                Update,
                (
                    ai::enemy_cooldowns,
                    ai::enemy_status,
                    ai::enemy_actions,
                    ai::move_enemies,
                )
                    .chain()
                    .in_set(FrameSet::Ai),
            )
            // Deaths are settled after this frame's hits land
            .add_systems(
                Update,
                ai::check_enemy_deaths
                    .after(apply_enemy_damage)
                    .before(grant_experience)
                    .in_set(FrameSet::Resolve),
            );
    }
}
