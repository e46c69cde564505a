//! Core plugin that sets up game states, events, frame ordering, and the pause gate.

use bevy::prelude::*;

use super::events::*;
use super::rng::GameRng;
use super::settings::GameSettings;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver) and the pause sub-state
/// - Global events (attack/magic requests, damage, particles, sounds)
/// - The ordered frame sets every other plugin schedules into
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Shared resources (settings are replaced once loaded from disk)
            .init_resource::<GameSettings>()
            .init_resource::<GameRng>()

            // Register global events
            .add_event::<PlayerCommand>()
            .add_event::<AttackRequest>()
            .add_event::<MagicRequest>()
            .add_event::<DamagePlayerEvent>()
            .add_event::<HitEvent>()
            .add_event::<GrantExpEvent>()
            .add_event::<SpawnParticlesEvent>()
            .add_event::<PlaySoundEvent>()
            .add_event::<UpgradeRequest>()

            // One frame: input -> simulate -> ai -> resolve -> effects -> render
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Simulate,
                    FrameSet::Ai,
                    FrameSet::Resolve,
                    FrameSet::Effects,
                    FrameSet::Render,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Simulate,
                    FrameSet::Ai,
                    FrameSet::Resolve,
                    FrameSet::Effects,
                )
                    .run_if(in_state(PlayState::Running)),
            )
            .configure_sets(
                Update,
                FrameSet::Render.run_if(not(in_state(GameState::Loading))),
            )

            // Open/close the upgrade menu with M
            .add_systems(
                Update,
                handle_pause_input
                    .before(FrameSet::Input)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Handle M key to toggle the upgrade menu.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        let next = current_state.get().toggled();
        info!("Menu toggled: {:?}", next);
        next_state.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_app;

    #[derive(Resource, Default, Debug, PartialEq)]
    struct Frames {
        simulated: u32,
        rendered: u32,
    }

    fn count_simulated(mut frames: ResMut<Frames>) {
        frames.simulated += 1;
    }

    fn count_rendered(mut frames: ResMut<Frames>) {
        frames.rendered += 1;
    }

    fn counting_app() -> App {
        let mut app = test_app();
        app.init_resource::<Frames>().add_systems(
            Update,
            (
                count_simulated.in_set(FrameSet::Simulate),
                count_rendered.in_set(FrameSet::Render),
            ),
        );
        app
    }

    fn frames(app: &App) -> (u32, u32) {
        let frames = app.world().resource::<Frames>();
        (frames.simulated, frames.rendered)
    }

    fn play_state(app: &App) -> PlayState {
        *app.world().resource::<State<PlayState>>().get()
    }

    #[test]
    fn paused_frames_render_without_simulating() {
        let mut app = counting_app();
        app.update();
        assert_eq!(frames(&app), (1, 1));

        app.world_mut()
            .resource_mut::<NextState<PlayState>>()
            .set(PlayState::Paused);
        app.update();
        app.update();
        assert_eq!(play_state(&app), PlayState::Paused);
        assert_eq!(frames(&app), (1, 3));

        app.world_mut()
            .resource_mut::<NextState<PlayState>>()
            .set(PlayState::Running);
        app.update();
        assert_eq!(frames(&app), (2, 4));
    }

    /// One frame with M freshly pressed.
    fn tap_m(app: &mut App) {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(KeyCode::KeyM);
        keyboard.clear();
        keyboard.press(KeyCode::KeyM);
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    }

    #[test]
    fn m_toggles_the_menu() {
        let mut app = counting_app();

        // The toggle lands on the following frame
        tap_m(&mut app);
        app.update();
        assert_eq!(play_state(&app), PlayState::Paused);
        assert_eq!(frames(&app), (1, 2));

        tap_m(&mut app);
        app.update();
        assert_eq!(play_state(&app), PlayState::Running);
        assert_eq!(frames(&app), (2, 4));
    }
}
