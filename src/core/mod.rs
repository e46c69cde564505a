//! Core game module - states, events, settings, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod events;
mod plugin;
mod rng;
mod settings;
mod states;

pub use data::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use rng::GameRng;
pub use settings::*;
pub use states::*;
