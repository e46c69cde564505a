//! Effects module - one-shot particle animations.

mod particles;
mod plugin;

pub use particles::{ParticleAnimation, ParticleLibrary};
pub use plugin::EffectsPlugin;
