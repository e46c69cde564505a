//! Player module - player entity, actions, movement and upgrades.

mod components;
mod movement;
mod plugin;
mod upgrades;

pub use components::*;
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
