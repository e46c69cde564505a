//! Rendering plugin - camera offset and depth-sorted sprites.

use bevy::prelude::*;

use super::camera::*;
use crate::core::{FrameSet, GameSettings, GameState};

/// Rendering plugin - keeps the player centered and sprites depth sorted.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .init_resource::<CameraOffset>()
            .init_resource::<DrawOrder>()
            .add_systems(OnEnter(GameState::InGame), configure_viewport)
            .add_systems(
                Update,
                (update_camera_offset, depth_sort, place_sprites)
                    .chain()
                    .in_set(FrameSet::Render),
            );
    }
}

/// Size the viewport from the loaded settings.
fn configure_viewport(settings: Res<GameSettings>, mut viewport: ResMut<Viewport>) {
    *viewport = Viewport::from_settings(&settings);
    info!("Viewport: {}x{}", viewport.size.x, viewport.size.y);
}
