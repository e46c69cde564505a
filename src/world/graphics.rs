//! Image handles for tiles, entities and weapons.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::GraphicsCounts;
use crate::core::{GameSettings, Species};
use crate::player::Facing;

/// Every image the level needs, loaded once through the asset server.
///
/// Lookups never fail: an unknown index yields the default (empty) handle
/// so a sprite still gets spawned and simply draws nothing.
#[derive(Resource, Debug, Clone, Default)]
pub struct GraphicsLookup {
    pub floor: Handle<Image>,
    pub player: Handle<Image>,
    pub grass: Vec<Handle<Image>>,
    pub objects: Vec<Handle<Image>>,
    /// Per weapon, one image per facing (indexed by `Facing::index`)
    pub weapons: Vec<[Handle<Image>; 4]>,
    pub monsters: HashMap<Species, Handle<Image>>,
}

impl GraphicsLookup {
    /// Load every configured image.
    pub fn load(settings: &GameSettings, asset_server: &AssetServer) -> Self {
        let manifest = &settings.graphics;

        let weapons = settings
            .weapons
            .iter()
            .map(|weapon| {
                Facing::ALL.map(|facing| {
                    asset_server.load(format!("graphics/weapons/{}/{}.png", weapon.name, facing))
                })
            })
            .collect();

        let monsters = [Species::Bamboo, Species::Spirit, Species::Raccoon, Species::Squid]
            .into_iter()
            .map(|species| {
                let path = format!("graphics/monsters/{}/idle/0.png", species.name());
                (species, asset_server.load(path))
            })
            .collect();

        Self {
            floor: asset_server.load(manifest.floor.clone()),
            player: asset_server.load(manifest.player.clone()),
            grass: manifest.grass.iter().map(|p| asset_server.load(p.clone())).collect(),
            objects: manifest.objects.iter().map(|p| asset_server.load(p.clone())).collect(),
            weapons,
            monsters,
        }
    }

    /// Counts used to validate layout codes before spawning.
    pub fn counts(&self) -> GraphicsCounts {
        GraphicsCounts {
            grass: self.grass.len(),
            objects: self.objects.len(),
        }
    }

    pub fn grass(&self, variant: usize) -> Handle<Image> {
        self.grass.get(variant).cloned().unwrap_or_default()
    }

    pub fn object(&self, graphic: usize) -> Handle<Image> {
        self.objects.get(graphic).cloned().unwrap_or_default()
    }

    pub fn weapon(&self, index: usize, facing: Facing) -> Handle<Image> {
        self.weapons
            .get(index)
            .map(|images| images[facing.index()].clone())
            .unwrap_or_default()
    }

    pub fn monster(&self, species: Species) -> Handle<Image> {
        self.monsters.get(&species).cloned().unwrap_or_default()
    }
}
