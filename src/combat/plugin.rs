//! Combat plugin - attacks, spells, collision resolution and damage.

use bevy::prelude::*;

use super::components::CurrentAttack;
use super::magic::handle_magic_requests;
use super::systems::*;
use crate::core::FrameSet;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentAttack>()
            // Requests first so new hitboxes are tested this frame
            .add_systems(
                Update,
                (
                    handle_attack_requests,
                    handle_magic_requests,
                    resolve_attack_collisions,
                    apply_enemy_damage,
                    apply_player_damage,
                )
                    .chain()
                    .in_set(FrameSet::Resolve),
            )
            .add_systems(
                Update,
                (grant_experience, check_player_death)
                    .chain()
                    .after(apply_player_damage)
                    .in_set(FrameSet::Resolve),
            );
    }
}
