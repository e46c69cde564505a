//! Player-centered camera offset and depth-sorted sprite placement.
//!
//! World positions are top-left based with y growing downward. Every frame the
//! offset `player.center - half_viewport` is subtracted from each position to
//! get screen coordinates, which are then mapped onto a `Camera2d` sitting at
//! the origin.

use bevy::prelude::*;

use crate::core::GameSettings;
use crate::player::Player;
use crate::world::{Bounds, Floor, VisibleSprite};

/// Depth of the floor; sorted sprites are stacked above it.
const FLOOR_DEPTH: f32 = 0.0;
const SPRITE_DEPTH: f32 = 1.0;
const DEPTH_STEP: f32 = 0.001;

/// Size of the drawing surface in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            size: Vec2::new(settings.viewport.0, settings.viewport.1),
        }
    }

    /// Primary window with the same pixel size as the viewport.
    pub fn window(&self, title: &str) -> Window {
        Window {
            title: title.to_string(),
            resolution: (self.size.x, self.size.y).into(),
            ..default()
        }
    }

    pub fn half(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Bevy translation of a screen-space top-left corner.
    pub fn to_translation(&self, screen: Vec2, depth: f32) -> Vec3 {
        let half = self.half();
        Vec3::new(screen.x - half.x, half.y - screen.y, depth)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_settings(&GameSettings::default())
    }
}

/// Offset subtracted from world positions this frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraOffset(pub Vec2);

/// Last computed back-to-front draw order.
#[derive(Resource, Debug, Clone, Default)]
pub struct DrawOrder(pub Vec<Entity>);

/// Offset that puts the player center in the middle of the viewport.
pub fn camera_offset(player_center: Vec2, half_viewport: Vec2) -> Vec2 {
    player_center - half_viewport
}

/// Order sprites by vertical center, top first.
///
/// Ties keep a stable order by entity id so equal rows never flicker.
pub fn depth_order(mut sprites: Vec<(Entity, f32)>) -> Vec<Entity> {
    sprites.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    sprites.into_iter().map(|(entity, _)| entity).collect()
}

/// Recompute the offset from the player (kept when there is no player).
pub fn update_camera_offset(
    viewport: Res<Viewport>,
    player_query: Query<&Bounds, With<Player>>,
    mut offset: ResMut<CameraOffset>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    offset.0 = camera_offset(player.center(), viewport.half());
}

/// Sort every visible sprite for this frame.
pub fn depth_sort(visible: Query<(Entity, &Bounds), With<VisibleSprite>>, mut order: ResMut<DrawOrder>) {
    let sprites = visible
        .iter()
        .map(|(entity, bounds)| (entity, bounds.center().y))
        .collect();
    order.0 = depth_order(sprites);
}

/// Write screen positions and depths into sprite transforms.
pub fn place_sprites(
    viewport: Res<Viewport>,
    offset: Res<CameraOffset>,
    order: Res<DrawOrder>,
    mut sprites: Query<(&Bounds, &mut Transform), (With<VisibleSprite>, Without<Floor>)>,
    mut floor: Query<&mut Transform, With<Floor>>,
) {
    for mut transform in floor.iter_mut() {
        transform.translation = viewport.to_translation(-offset.0, FLOOR_DEPTH);
    }

    for (index, entity) in order.0.iter().enumerate() {
        let Ok((bounds, mut transform)) = sprites.get_mut(*entity) else {
            continue;
        };
        let depth = SPRITE_DEPTH + index as f32 * DEPTH_STEP;
        transform.translation = viewport.to_translation(bounds.rect.min - offset.0, depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_app;
    use crate::world::rect_from_top_left;

    #[test]
    fn sorts_by_vertical_center() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();

        let order = depth_order(vec![(a, 50.0), (b, 10.0), (c, 30.0)]);
        assert_eq!(order, vec![b, c, a]);
    }

    #[test]
    fn equal_centers_keep_entity_order() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        assert_eq!(depth_order(vec![(b, 5.0), (a, 5.0)]), vec![a, b]);
    }

    #[test]
    fn window_takes_the_viewport_size() {
        let settings = GameSettings::from_ron("(viewport: (640.0, 480.0))").expect("viewport parses");
        let viewport = Viewport::from_settings(&settings);
        let window = viewport.window("test");

        assert_eq!(window.resolution.width(), 640.0);
        assert_eq!(window.resolution.height(), 480.0);
        assert_eq!(viewport.half(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn offset_centers_the_player() {
        let offset = camera_offset(Vec2::new(1000.0, 500.0), Vec2::new(640.0, 360.0));
        assert_eq!(offset, Vec2::new(360.0, 140.0));
    }

    #[test]
    fn player_is_drawn_at_screen_center() {
        let mut app = test_app();
        app.init_resource::<Viewport>()
            .init_resource::<CameraOffset>()
            .init_resource::<DrawOrder>()
            .add_systems(Update, (update_camera_offset, depth_sort, place_sprites).chain());

        let player = app
            .world_mut()
            .spawn((
                Player,
                VisibleSprite,
                Bounds::exact(rect_from_top_left(Vec2::new(968.0, 468.0), Vec2::splat(64.0))),
                Transform::default(),
            ))
            .id();
        let tree = app
            .world_mut()
            .spawn((
                VisibleSprite,
                Bounds::exact(rect_from_top_left(Vec2::new(900.0, 400.0), Vec2::splat(64.0))),
                Transform::default(),
            ))
            .id();
        app.update();

        assert_eq!(app.world().resource::<DrawOrder>().0, vec![tree, player]);
        let depth = |entity| app.world().get::<Transform>(entity).map_or(0.0, |t| t.translation.z);
        let translation = app.world().get::<Transform>(player).map(|t| t.translation.truncate());
        // top-left of a 64px sprite centered on screen
        assert_eq!(translation, Some(Vec2::new(-32.0, 32.0)));
        assert!(depth(player) > depth(tree));
    }
}
