//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The simulation only
//! advances in `PlayState::Running`, while the render pass keeps drawing the
//! world in every state after loading.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while settings and map layouts are read
/// - Enter `InGame` once the level plan is ready
/// - `GameOver` when the player's health runs out (terminal)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Reading settings and map layouts
    #[default]
    Loading,
    /// Level is built and being played
    InGame,
    /// Player has died
    GameOver,
}

/// Pause gate - only exists while `GameState::InGame`.
///
/// While `Paused`, the world is still drawn (frozen) together with the
/// upgrade overlay, but no entity updates, AI ticks, or attack resolution run.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal simulation
    #[default]
    Running,
    /// Upgrade menu is open
    Paused,
}

impl PlayState {
    /// The state the menu toggle moves to.
    pub fn toggled(self) -> Self {
        match self {
            PlayState::Running => PlayState::Paused,
            PlayState::Paused => PlayState::Running,
        }
    }
}

/// Ordered phases of one frame.
///
/// Everything up to `Effects` is gated on `PlayState::Running`; `Render` runs
/// whenever a level exists.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Translate raw input into player commands
    Input,
    /// Player update, attack/magic requests, particle animation
    Simulate,
    /// Enemy status, actions and movement
    Ai,
    /// Attack-vs-attackable collisions, damage, deaths, experience
    Resolve,
    /// Particle spawning and sound cues
    Effects,
    /// Camera offset, depth sort, sprite placement
    Render,
}
