//! UI module - HUD, upgrade overlay and game over screen.

mod hud;
mod plugin;

pub use hud::loadout_label;
pub use plugin::{card_label, UiPlugin, UpgradeSelection};
