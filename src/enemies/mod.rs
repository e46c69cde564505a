//! Enemies module - enemy entities, AI, and spawning.

mod ai;
mod components;
mod plugin;
mod spawning;

pub use components::*;
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
