//! Enemy spawning from level placements.

use bevy::prelude::*;

use super::components::{AiState, AttackCooldown, Enemy, EnemyStats};
use crate::combat::{Health, Invulnerability};
use crate::core::{GameSettings, Species};
use crate::world::{
    rect_from_top_left, Attackable, Bounds, LevelGeometry, MoveDirection, SpriteType, VisibleSprite,
};

/// Spawn one enemy with its top-left at `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    species: Species,
    position: Vec2,
    settings: &GameSettings,
    image: Handle<Image>,
) -> Entity {
    let data = settings.monster(species);
    let size = Vec2::new(data.size.0, data.size.1);
    let timing = &settings.enemy_timing;

    commands
        .spawn((
            Enemy { species },
            SpriteType::Enemy,
            VisibleSprite,
            Attackable,
            Bounds::new(
                rect_from_top_left(position, size),
                Vec2::new(0.0, settings.hitbox_offsets.enemy),
            ),
            EnemyStats::from(&data),
            Health::new(data.health),
            AiState::default(),
            AttackCooldown::new(timing.attack_cooldown()),
            Invulnerability::new(timing.invulnerability()),
            MoveDirection::default(),
            Sprite {
                image,
                custom_size: Some(size),
                anchor: bevy::sprite::Anchor::TopLeft,
                ..default()
            },
            LevelGeometry,
        ))
        .id()
}
