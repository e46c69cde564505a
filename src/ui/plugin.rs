//! UI plugin - upgrade overlay, game over screen and the HUD.

use bevy::prelude::*;

use super::hud;
use crate::core::{GameState, PlayState, Stat, UpgradeRequest};
use crate::player::{Experience, Player, PlayerStats};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.init_resource::<UpgradeSelection>()
            // Upgrade overlay while paused
            .add_systems(OnEnter(PlayState::Paused), setup_upgrade_menu)
            .add_systems(
                Update,
                (upgrade_keyboard_input, upgrade_button_input, refresh_upgrade_cards)
                    .chain()
                    .run_if(in_state(PlayState::Paused)),
            )
            .add_systems(OnExit(PlayState::Paused), cleanup_upgrade_menu)
            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(Update, game_over_input.run_if(in_state(GameState::GameOver)));
    }
}

/// Marker for upgrade overlay entities.
#[derive(Component)]
struct UpgradeMenuUi;

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

/// Text of one upgrade card.
#[derive(Component)]
struct UpgradeCardText(Stat);

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    Upgrade(Stat),
    Quit,
}

/// Card highlighted for keyboard selection.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSelection(pub usize);

impl UpgradeSelection {
    pub fn stat(self) -> Stat {
        Stat::ALL[self.0 % Stat::ALL.len()]
    }

    pub fn step(self, forward: bool) -> Self {
        let count = Stat::ALL.len();
        if forward {
            Self((self.0 + 1) % count)
        } else {
            Self((self.0 + count - 1) % count)
        }
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);
const CARD_SELECTED: Color = Color::srgb(0.85, 0.85, 0.55);

/// Text shown on a card: stat name, current value and cost.
pub fn card_label(stats: &PlayerStats, stat: Stat) -> String {
    format!(
        "{}\n{:.0} / {:.0}\ncost {:.0}",
        stat,
        stats.stats.get(stat),
        stats.max.get(stat),
        stats.cost.get(stat)
    )
}

/// Set up the upgrade overlay.
fn setup_upgrade_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            UpgradeMenuUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("UPGRADES"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    ..default()
                })
                .with_children(|row| {
                    for stat in Stat::ALL {
                        spawn_menu_button(row, "", MenuButton::Upgrade(stat), Some(UpgradeCardText(stat)));
                    }
                });
        });
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton, label: Option<UpgradeCardText>) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(180.0),
                height: Val::Px(120.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            BorderColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            let mut text = button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
                TextLayout::new_with_justify(JustifyText::Center),
            ));
            if let Some(label) = label {
                text.insert(label);
            }
        });
}

/// Arrow keys move the selection, space buys the selected upgrade.
fn upgrade_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<UpgradeSelection>,
    mut requests: EventWriter<UpgradeRequest>,
) {
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        *selection = selection.step(true);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        *selection = selection.step(false);
    }
    if keyboard.just_pressed(KeyCode::Space) {
        requests.send(UpgradeRequest(selection.stat()));
    }
}

/// Handle upgrade button clicks.
fn upgrade_button_input(
    mut interaction_query: Query<(&Interaction, &MenuButton, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
    mut selection: ResMut<UpgradeSelection>,
    mut requests: EventWriter<UpgradeRequest>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        let MenuButton::Upgrade(stat) = *button else {
            continue;
        };
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                if let Some(index) = Stat::ALL.iter().position(|s| *s == stat) {
                    *selection = UpgradeSelection(index);
                }
                requests.send(UpgradeRequest(stat));
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// Keep card texts and the selection border in sync with the player.
fn refresh_upgrade_cards(
    selection: Res<UpgradeSelection>,
    player_query: Query<(&PlayerStats, &Experience), With<Player>>,
    mut text_query: Query<(&UpgradeCardText, &mut Text)>,
    mut border_query: Query<(&MenuButton, &mut BorderColor)>,
) {
    let Ok((stats, exp)) = player_query.get_single() else {
        return;
    };

    for (card, mut text) in text_query.iter_mut() {
        let affordable = if exp.0 as f32 >= stats.cost.get(card.0) { "" } else { "\n(need exp)" };
        text.0 = format!("{}{}", card_label(stats, card.0), affordable);
    }
    for (button, mut border) in border_query.iter_mut() {
        let selected = *button == MenuButton::Upgrade(selection.stat());
        border.0 = if selected { CARD_SELECTED } else { BUTTON_IDLE };
    }
}

/// Clean up upgrade overlay entities.
fn cleanup_upgrade_menu(mut commands: Commands, query: Query<Entity, With<UpgradeMenuUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Set up the game over screen over the frozen world.
fn setup_game_over(mut commands: Commands) {
    info!("Game over");
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.8)),
            GameOverUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU DIED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, "Quit", MenuButton::Quit, None);
        });
}

/// Handle game over button interactions.
fn game_over_input(
    mut interaction_query: Query<(&Interaction, &MenuButton, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                if *button == MenuButton::Quit {
                    exit.send(AppExit::Success);
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSettings;
    use crate::testing::{capture, captured, test_app};

    #[test]
    fn selection_wraps_both_ways() {
        let first = UpgradeSelection::default();
        assert_eq!(first.stat(), Stat::Health);
        assert_eq!(first.step(false).stat(), Stat::Speed);
        assert_eq!(first.step(false).step(true), first);
    }

    #[test]
    fn card_shows_value_and_cost() {
        let stats = PlayerStats::from_settings(&GameSettings::default().player);
        assert_eq!(card_label(&stats, Stat::Health), "health\n100 / 300\ncost 100");
    }

    #[test]
    fn space_buys_the_selected_stat() {
        let mut app = test_app();
        app.init_resource::<UpgradeSelection>()
            .add_systems(Update, upgrade_keyboard_input);
        capture::<UpgradeRequest>(&mut app);

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::ArrowRight);
            keyboard.press(KeyCode::Space);
        }
        app.update();

        assert_eq!(captured::<UpgradeRequest>(&app), vec![UpgradeRequest(Stat::Energy)]);
    }
}
