//! Level construction from a validated plan.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::components::*;
use super::data::{LevelPlan, PlacementKind};
use super::geometry::{rect_from_top_left, Bounds};
use super::graphics::GraphicsLookup;
use crate::core::GameSettings;
use crate::enemies::spawn_enemy;
use crate::player::spawn_player;

/// What a build produced, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub obstacles: usize,
    pub grass: usize,
    pub objects: usize,
    pub enemies: usize,
    pub player: Option<Entity>,
}

/// Spawn every placement of the plan, plus the floor and the camera.
pub fn build_level(
    commands: &mut Commands,
    plan: &LevelPlan,
    settings: &GameSettings,
    graphics: &GraphicsLookup,
) -> LevelSummary {
    let tile = settings.tile_size;
    let offsets = &settings.hitbox_offsets;
    let mut summary = LevelSummary::default();

    for placement in &plan.placements {
        let cell = placement.position;
        let tile_rect = rect_from_top_left(cell, Vec2::splat(tile));

        match placement.kind {
            PlacementKind::Boundary => {
                commands.spawn((
                    Tile { cell },
                    SpriteType::Invisible,
                    Obstacle,
                    Bounds::new(tile_rect, Vec2::new(0.0, offsets.invisible)),
                    LevelGeometry,
                ));
                summary.obstacles += 1;
            }
            PlacementKind::Grass { variant } => {
                commands.spawn((
                    Tile { cell },
                    SpriteType::Grass,
                    Obstacle,
                    VisibleSprite,
                    Attackable,
                    Bounds::new(tile_rect, Vec2::new(0.0, offsets.grass)),
                    tile_sprite(graphics.grass(variant), tile_rect.size()),
                    LevelGeometry,
                ));
                summary.obstacles += 1;
                summary.grass += 1;
            }
            PlacementKind::Object { graphic } => {
                // Two tiles tall, standing on its grid cell
                let rect = rect_from_top_left(cell - Vec2::new(0.0, tile), Vec2::new(tile, 2.0 * tile));
                commands.spawn((
                    Tile { cell },
                    SpriteType::Object,
                    Obstacle,
                    VisibleSprite,
                    Bounds::new(rect, Vec2::new(0.0, offsets.object)),
                    tile_sprite(graphics.object(graphic), rect.size()),
                    LevelGeometry,
                ));
                summary.obstacles += 1;
                summary.objects += 1;
            }
            PlacementKind::Player => {
                summary.player = Some(spawn_player(commands, cell, settings, graphics.player.clone()));
            }
            PlacementKind::Enemy(species) => {
                spawn_enemy(commands, species, cell, settings, graphics.monster(species));
                summary.enemies += 1;
            }
        }
    }

    commands.spawn((
        Floor,
        Sprite {
            image: graphics.floor.clone(),
            anchor: Anchor::TopLeft,
            ..default()
        },
        LevelGeometry,
    ));
    commands.spawn((Camera2d, LevelGeometry));

    summary
}

fn tile_sprite(image: Handle<Image>, size: Vec2) -> Sprite {
    Sprite {
        image,
        custom_size: Some(size),
        anchor: Anchor::TopLeft,
        ..default()
    }
}
