//! World plugin - map loading and level construction.

use bevy::prelude::*;

use crate::core::{load_settings, GameRng, GameSettings, GameState};
use crate::effects::ParticleLibrary;

use super::builder::build_level;
use super::data::{plan_level, LevelLayouts, LevelPlan};
use super::error::LevelError;
use super::graphics::GraphicsLookup;

/// World plugin - reads the layout files and builds the level on entering play.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_settings, load_level_data).chain())
            .add_systems(OnEnter(GameState::InGame), setup_level);
    }
}

/// Read and validate the four layout layers, then queue the level for building.
///
/// Any failure is fatal: nothing is spawned and the app exits with an error.
pub fn load_level_data(
    mut commands: Commands,
    settings: Res<GameSettings>,
    asset_server: Res<AssetServer>,
    mut rng: ResMut<GameRng>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let graphics = GraphicsLookup::load(&settings, &asset_server);

    match prepare_plan(&settings, &graphics, &mut rng) {
        Ok(plan) => {
            if let Some(spawn) = plan.player_position() {
                info!("Level planned: {} placements, player at {}", plan.placements.len(), spawn);
            }
            commands.insert_resource(plan);
            commands.insert_resource(graphics);
            commands.insert_resource(ParticleLibrary::load(&settings, &asset_server));
            next_state.set(GameState::InGame);
        }
        Err(e) => {
            error!("Failed to load level: {}", e);
            exit.send(AppExit::error());
        }
    }
}

fn prepare_plan(
    settings: &GameSettings,
    graphics: &GraphicsLookup,
    rng: &mut GameRng,
) -> Result<LevelPlan, LevelError> {
    let layouts = LevelLayouts::load(&settings.map)?;
    plan_level(&layouts, graphics.counts(), settings.tile_size, &mut rng.0)
}

/// Spawn the planned level.
pub fn setup_level(
    mut commands: Commands,
    plan: Option<Res<LevelPlan>>,
    settings: Res<GameSettings>,
    graphics: Option<Res<GraphicsLookup>>,
) {
    let (Some(plan), Some(graphics)) = (plan, graphics) else {
        error!("Entered play without a level plan");
        return;
    };

    let summary = build_level(&mut commands, &plan, &settings, &graphics);
    info!(
        "Level built: {} obstacles ({} grass, {} objects), {} enemies",
        summary.obstacles, summary.grass, summary.objects, summary.enemies
    );
}
