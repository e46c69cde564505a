//! World module - map layouts, tiles, collision geometry and level building.

mod builder;
mod components;
mod data;
mod error;
mod geometry;
mod graphics;
mod plugin;

pub use builder::{build_level, LevelSummary};
pub use components::*;
pub use data::{plan_level, GraphicsCounts, LayoutGrid, LayoutLayer, LevelLayouts, LevelPlan, Placement, PlacementKind};
pub use error::LevelError;
pub use geometry::{move_with_collisions, overlaps, rect_from_top_left, Bounds};
pub use graphics::GraphicsLookup;
pub use plugin::{load_level_data, setup_level, WorldPlugin};
