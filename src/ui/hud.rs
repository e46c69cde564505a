//! In-game HUD - health, energy, experience and the equipped weapon and spell.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::{GameSettings, GameState, MagicStyle, Stat};
use crate::player::{Energy, Experience, Loadout, Player, PlayerStats};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for energy bar fill.
#[derive(Component)]
pub struct EnergyBar;

#[derive(Component)]
pub struct ExpText;

/// Name of the equipped weapon and spell.
#[derive(Component)]
pub struct LoadoutText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud).add_systems(
        Update,
        (update_health_bar, update_energy_bar, update_exp_text, update_loadout_text)
            .run_if(not(in_state(GameState::Loading))),
    );
}

/// Fill fraction of a bar, clamped to `0..=1` (empty for a zero maximum).
fn bar_fraction(current: f32, maximum: f32) -> f32 {
    if maximum <= 0.0 {
        return 0.0;
    }
    (current / maximum).clamp(0.0, 1.0)
}

/// "sword | flame" style label for the current loadout.
pub fn loadout_label(settings: &GameSettings, loadout: &Loadout) -> String {
    let weapon = settings.weapon(loadout.weapon).map_or("-", |weapon| weapon.name.as_str());
    let spell = match settings.spell(loadout.magic).map(|spell| spell.style) {
        Some(MagicStyle::Flame) => "flame",
        Some(MagicStyle::Heal) => "heal",
        None => "-",
    };
    format!("{weapon} | {spell}")
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(10.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Bars, top-left
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                })
                .with_children(|bars| {
                    spawn_bar(bars, "Health", 200.0, Color::srgb(0.8, 0.2, 0.2), HealthBar);
                    spawn_bar(bars, "Energy", 140.0, Color::srgb(0.2, 0.4, 0.9), EnergyBar);
                });

            // Loadout left, experience right
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((hud_text(""), LoadoutText));
                    row.spawn((hud_text("0"), ExpText));
                });
        });
}

fn hud_text(text: &str) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.93, 0.93, 0.93)),
    )
}

/// Helper to spawn a status bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, width: f32, color: Color, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(width),
                        height: Val::Px(20.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.13, 0.13, 0.13)),
                    BorderColor(Color::srgb(0.07, 0.07, 0.07)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(bar_fraction(health.current, health.maximum) * 100.0);
}

/// Update energy bar against the current energy stat.
fn update_energy_bar(
    player_query: Query<(&Energy, &PlayerStats), With<Player>>,
    mut bar_query: Query<&mut Node, With<EnergyBar>>,
) {
    let Ok((energy, stats)) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(bar_fraction(energy.current, stats.stats.get(Stat::Energy)) * 100.0);
}

fn update_exp_text(
    player_query: Query<&Experience, (With<Player>, Changed<Experience>)>,
    mut text_query: Query<&mut Text, With<ExpText>>,
) {
    let Ok(exp) = player_query.get_single() else {
        return;
    };
    for mut text in text_query.iter_mut() {
        text.0 = exp.0.to_string();
    }
}

fn update_loadout_text(
    settings: Res<GameSettings>,
    player_query: Query<&Loadout, (With<Player>, Changed<Loadout>)>,
    mut text_query: Query<&mut Text, With<LoadoutText>>,
) {
    let Ok(loadout) = player_query.get_single() else {
        return;
    };
    for mut text in text_query.iter_mut() {
        text.0 = loadout_label(&settings, loadout);
    }
}
