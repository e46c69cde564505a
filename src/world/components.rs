//! Sprite-set membership and tile components.
//!
//! A level entity joins a sprite set by carrying the set's marker component.
//! Markers are inserted at spawn and only ever leave with the entity itself,
//! so membership never changes implicitly.

use bevy::prelude::*;

/// Blocks player and enemy movement (collides by hitbox).
#[derive(Component, Debug, Default)]
pub struct Obstacle;

/// Drawn by the camera group, depth sorted every frame.
#[derive(Component, Debug, Default)]
pub struct VisibleSprite;

/// Can be hit by attack sprites.
#[derive(Component, Debug, Default)]
pub struct Attackable;

/// Live attack hitbox (weapon swing or flame burst).
#[derive(Component, Debug, Default)]
pub struct AttackSprite;

/// Role of a level entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteType {
    Invisible,
    Grass,
    Object,
    Player,
    Enemy,
    Weapon,
    Magic,
    Particle,
}

/// Static map tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct Tile {
    /// Grid-aligned world position of the cell the tile came from
    pub cell: Vec2,
}

/// Marker for everything spawned by the level builder.
#[derive(Component)]
pub struct LevelGeometry;

/// The ground image drawn under every sprite.
#[derive(Component)]
pub struct Floor;

/// Desired movement direction of a player or enemy (not normalized).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveDirection(pub Vec2);
