//! Wildgrove - Entry Point
//!
//! Controls:
//! - Arrow keys: Move
//! - Space: Attack
//! - Left Ctrl: Cast spell
//! - Q / E: Switch weapon / spell
//! - M: Open/close the upgrade menu (arrows + space to buy)

use bevy::prelude::*;
use wildgrove::core::GameSettings;
use wildgrove::rendering::Viewport;

fn main() {
    // The window and the in-game viewport share one size
    let viewport = Viewport::from_settings(&GameSettings::load());

    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(viewport.window("Wildgrove")),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )

        // Audio
        .add_plugins(bevy_kira_audio::AudioPlugin)

        // Our game plugin
        .add_plugins(wildgrove::WildgrovePlugin)

        .run();
}
