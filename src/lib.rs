//! Wildgrove - a top-down tile-based action game in Bevy.
//!
//! The level is read from CSV layout layers, populated with a player and
//! enemies, and simulated once per frame: movement against obstacle
//! hitboxes, enemy AI, weapon swings and spells against attackable sprites,
//! and camera-relative depth-sorted drawing.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, the pause gate, frame ordering, events, settings
//! - **World**: Map layouts, tiles, collision geometry, level building
//! - **Player**: Input, movement, attacks and spells, upgrades
//! - **Enemies**: Spawning and the idle/move/attack AI
//! - **Combat**: Attack hitboxes, magic, damage, death and experience
//! - **Effects**: One-shot particle animations
//! - **Rendering**: Camera offset and depth sorting
//! - **Audio**: Sound cues and music
//! - **UI**: HUD, upgrade overlay, game over screen

pub mod audio;
pub mod combat;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

#[cfg(test)]
mod testing;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Expects `DefaultPlugins` and `bevy_kira_audio::AudioPlugin` to be present.
pub struct WildgrovePlugin;

impl Plugin for WildgrovePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Level loading and building
            .add_plugins(world::WorldPlugin)

            // Simulation
            .add_plugins(player::PlayerPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(effects::EffectsPlugin)

            // Presentation
            .add_plugins(rendering::RenderingPlugin)
            .add_plugins(audio::AudioCuePlugin)
            .add_plugins(ui::UiPlugin);
    }
}
