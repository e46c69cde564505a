//! Combat module - attack hitboxes, spells, hits and damage.

mod components;
mod magic;
mod plugin;
mod systems;

pub use components::*;
pub use magic::flame_positions;
pub use plugin::CombatPlugin;
pub use systems::{apply_enemy_damage, grant_experience, weapon_rect};
