//! Audio module - sound effects and music.

mod plugin;

pub use plugin::{AudioCuePlugin, SoundLibrary};
