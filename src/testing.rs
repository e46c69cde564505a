//! Headless app harness for system tests.

use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::core::{CorePlugin, GameRng, GameState};

/// Fixed frame step used by `test_app`.
pub const FRAME: Duration = Duration::from_millis(16);

/// Minimal app with the core plugin, manual time and a seeded rng.
///
/// One (zero-length) frame has already run, so the clock is started and the
/// app is in `GameState::InGame` with the simulation running.
pub fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_resource::<ButtonInput<KeyCode>>()
        .add_plugins(CorePlugin)
        .insert_resource(GameRng::seeded(7))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_max_delta(Duration::from_secs(10));
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app
}

/// Run one update whose frame is `step` long.
pub fn advance_by(app: &mut App, step: Duration) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.update();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
}

/// Run `f` with a `Commands` bound to the app's world, then apply it.
pub fn with_commands<T>(app: &mut App, f: impl FnOnce(&mut Commands) -> T) -> T {
    let mut queue = CommandQueue::default();
    let result = {
        let mut commands = Commands::new(&mut queue, app.world());
        f(&mut commands)
    };
    queue.apply(app.world_mut());
    result
}

/// Every event of type `E` seen so far.
#[derive(Resource)]
pub struct Captured<E: Event>(pub Vec<E>);

fn collect<E: Event + Clone>(mut reader: EventReader<E>, mut captured: ResMut<Captured<E>>) {
    captured.0.extend(reader.read().cloned());
}

/// Start recording events of type `E` (read at the end of each frame).
pub fn capture<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Captured::<E>(Vec::new()))
        .add_systems(Last, collect::<E>);
}

pub fn captured<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .get_resource::<Captured<E>>()
        .map(|captured| captured.0.clone())
        .unwrap_or_default()
}
