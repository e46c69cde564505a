//! Game settings loaded from an external RON file.
//!
//! Every tunable number of the simulation lives here so balance changes do not
//! need a recompile. Missing fields fall back to the built-in tables.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use super::data::{AttackType, MagicStyle, ParticleKind, Species, StatBlock};

/// Settings file location, relative to the working directory.
pub const SETTINGS_PATH: &str = "assets/data/settings.ron";

/// Paths of the four layout layers.
#[derive(Debug, Clone, Deserialize)]
pub struct MapFiles {
    pub boundary: String,
    pub grass: String,
    pub object: String,
    pub entities: String,
}

impl Default for MapFiles {
    fn default() -> Self {
        Self {
            boundary: "assets/map/map_FloorBlocks.csv".to_string(),
            grass: "assets/map/map_Grass.csv".to_string(),
            object: "assets/map/map_Objects.csv".to_string(),
            entities: "assets/map/map_Entities.csv".to_string(),
        }
    }
}

/// Image paths (asset-server relative) for tiles and the floor.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphicsManifest {
    pub floor: String,
    pub player: String,
    pub grass: Vec<String>,
    pub objects: Vec<String>,
}

impl Default for GraphicsManifest {
    fn default() -> Self {
        Self {
            floor: "graphics/tilemap/ground.png".to_string(),
            player: "graphics/player/down_idle/idle_down.png".to_string(),
            grass: (1..=3).map(|i| format!("graphics/grass/grass_{i}.png")).collect(),
            objects: (0..21).map(|i| format!("graphics/objects/{i}.png")).collect(),
        }
    }
}

/// Vertical hitbox shrink per sprite type (negative shrinks).
#[derive(Debug, Clone, Deserialize)]
pub struct HitboxOffsets {
    /// Player shrinks on both axes
    pub player: (f32, f32),
    pub enemy: f32,
    pub object: f32,
    pub grass: f32,
    pub invisible: f32,
}

impl Default for HitboxOffsets {
    fn default() -> Self {
        Self {
            player: (-6.0, -26.0),
            enemy: -10.0,
            object: -40.0,
            grass: -10.0,
            invisible: 0.0,
        }
    }
}

/// Player stat tables and timing windows.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSettings {
    pub stats: StatBlock,
    pub max_stats: StatBlock,
    pub upgrade_cost: StatBlock,
    pub starting_exp: u32,
    pub size: (f32, f32),
    pub attack_cooldown_ms: u64,
    pub invulnerability_ms: u64,
    pub switch_cooldown_ms: u64,
    /// Energy regained per reference frame, as a fraction of the magic stat
    pub energy_recovery: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            stats: StatBlock {
                health: 100.0,
                energy: 60.0,
                attack: 10.0,
                magic: 4.0,
                speed: 5.0,
            },
            max_stats: StatBlock {
                health: 300.0,
                energy: 140.0,
                attack: 20.0,
                magic: 10.0,
                speed: 10.0,
            },
            upgrade_cost: StatBlock::splat(100.0),
            starting_exp: 500,
            size: (64.0, 64.0),
            attack_cooldown_ms: 400,
            invulnerability_ms: 500,
            switch_cooldown_ms: 200,
            energy_recovery: 0.01,
        }
    }
}

impl PlayerSettings {
    pub fn attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.attack_cooldown_ms)
    }

    pub fn invulnerability(&self) -> Duration {
        Duration::from_millis(self.invulnerability_ms)
    }

    pub fn switch_cooldown(&self) -> Duration {
        Duration::from_millis(self.switch_cooldown_ms)
    }
}

/// Enemy timing windows shared by all species.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyTiming {
    pub attack_cooldown_ms: u64,
    pub invulnerability_ms: u64,
}

impl Default for EnemyTiming {
    fn default() -> Self {
        Self {
            attack_cooldown_ms: 400,
            invulnerability_ms: 300,
        }
    }
}

impl EnemyTiming {
    pub fn attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.attack_cooldown_ms)
    }

    pub fn invulnerability(&self) -> Duration {
        Duration::from_millis(self.invulnerability_ms)
    }
}

/// A melee weapon the player can cycle to.
#[derive(Debug, Clone, Deserialize)]
pub struct WeaponData {
    pub name: String,
    pub cooldown_ms: u64,
    pub damage: f32,
    /// Hitbox size when swung left/right; rotated for up/down
    pub size: (f32, f32),
}

impl WeaponData {
    fn new(name: &str, cooldown_ms: u64, damage: f32, size: (f32, f32)) -> Self {
        Self {
            name: name.to_string(),
            cooldown_ms,
            damage,
            size,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// A spell the player can cycle to.
#[derive(Debug, Clone, Deserialize)]
pub struct MagicData {
    pub style: MagicStyle,
    pub strength: f32,
    pub cost: f32,
}

/// Species stat block.
#[derive(Debug, Clone, Deserialize)]
pub struct MonsterData {
    pub health: f32,
    pub exp: u32,
    pub damage: f32,
    pub attack_type: AttackType,
    pub attack_sound: String,
    pub speed: f32,
    pub attack_radius: f32,
    pub notice_radius: f32,
    pub size: (f32, f32),
}

impl MonsterData {
    #[allow(clippy::too_many_arguments)]
    fn new(
        health: f32,
        exp: u32,
        damage: f32,
        attack_type: AttackType,
        attack_sound: &str,
        speed: f32,
        attack_radius: f32,
        notice_radius: f32,
    ) -> Self {
        Self {
            health,
            exp,
            damage,
            attack_type,
            attack_sound: attack_sound.to_string(),
            speed,
            attack_radius,
            notice_radius,
            size: (64.0, 64.0),
        }
    }
}

/// Animation frames for one particle kind.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticleData {
    /// Frame folders; one is picked at random per spawn
    pub folders: Vec<String>,
    pub frames: usize,
    pub frame_secs: f32,
    pub size: (f32, f32),
}

impl ParticleData {
    fn single(folder: &str, frames: usize) -> Self {
        Self {
            folders: vec![folder.to_string()],
            frames,
            frame_secs: 0.11,
            size: (64.0, 64.0),
        }
    }
}

/// Sound file paths and volumes.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub music: String,
    pub music_volume: f64,
    pub effects_volume: f64,
    pub weapon_swing: String,
    pub heal: String,
    pub flame: String,
    pub hit: String,
    pub death: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music: "audio/main.ogg".to_string(),
            music_volume: 0.5,
            effects_volume: 0.4,
            weapon_swing: "audio/sword.wav".to_string(),
            heal: "audio/heal.wav".to_string(),
            flame: "audio/Fire.wav".to_string(),
            hit: "audio/hit.wav".to_string(),
            death: "audio/death.wav".to_string(),
        }
    }
}

/// Settings loaded from assets/data/settings.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Pixels per grid cell
    pub tile_size: f32,
    /// Viewport size in pixels
    pub viewport: (f32, f32),
    /// Frame rate the per-frame speeds in the tables were tuned for
    pub reference_fps: f32,
    pub map: MapFiles,
    pub graphics: GraphicsManifest,
    pub hitbox_offsets: HitboxOffsets,
    pub player: PlayerSettings,
    pub enemy_timing: EnemyTiming,
    pub weapons: Vec<WeaponData>,
    pub magic: Vec<MagicData>,
    pub monsters: HashMap<Species, MonsterData>,
    pub particles: HashMap<ParticleKind, ParticleData>,
    pub audio: AudioSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        let weapons = vec![
            WeaponData::new("sword", 100, 15.0, (40.0, 16.0)),
            WeaponData::new("lance", 400, 30.0, (60.0, 16.0)),
            WeaponData::new("axe", 300, 20.0, (44.0, 24.0)),
            WeaponData::new("rapier", 50, 8.0, (48.0, 12.0)),
            WeaponData::new("sai", 80, 10.0, (36.0, 16.0)),
        ];

        let magic = vec![
            MagicData {
                style: MagicStyle::Flame,
                strength: 5.0,
                cost: 20.0,
            },
            MagicData {
                style: MagicStyle::Heal,
                strength: 20.0,
                cost: 10.0,
            },
        ];

        let monsters = HashMap::from([
            (
                Species::Squid,
                MonsterData::new(100.0, 100, 20.0, AttackType::Slash, "audio/attack/slash.wav", 3.0, 80.0, 360.0),
            ),
            (
                Species::Raccoon,
                MonsterData::new(300.0, 250, 40.0, AttackType::Claw, "audio/attack/claw.wav", 2.0, 120.0, 400.0),
            ),
            (
                Species::Spirit,
                MonsterData::new(100.0, 110, 8.0, AttackType::Thunder, "audio/attack/fireball.wav", 4.0, 60.0, 350.0),
            ),
            (
                Species::Bamboo,
                MonsterData::new(70.0, 120, 6.0, AttackType::LeafAttack, "audio/attack/slash.wav", 3.0, 50.0, 300.0),
            ),
        ]);

        let particles = HashMap::from([
            (ParticleKind::Flame, ParticleData::single("graphics/particles/flame/frames", 12)),
            (ParticleKind::Aura, ParticleData::single("graphics/particles/aura", 4)),
            (ParticleKind::Heal, ParticleData::single("graphics/particles/heal/frames", 5)),
            (ParticleKind::Claw, ParticleData::single("graphics/particles/claw", 4)),
            (ParticleKind::Slash, ParticleData::single("graphics/particles/slash", 4)),
            (ParticleKind::Thunder, ParticleData::single("graphics/particles/thunder", 8)),
            (ParticleKind::LeafAttack, ParticleData::single("graphics/particles/leaf_attack", 7)),
            (ParticleKind::Squid, ParticleData::single("graphics/particles/smoke_orange", 6)),
            (ParticleKind::Raccoon, ParticleData::single("graphics/particles/raccoon", 7)),
            (ParticleKind::Spirit, ParticleData::single("graphics/particles/nova", 6)),
            (ParticleKind::Bamboo, ParticleData::single("graphics/particles/bamboo", 6)),
            (
                ParticleKind::Leaf,
                ParticleData {
                    folders: (1..=6).map(|i| format!("graphics/particles/leaf{i}")).collect(),
                    frames: 8,
                    frame_secs: 0.11,
                    size: (64.0, 64.0),
                },
            ),
        ]);

        Self {
            tile_size: 64.0,
            viewport: (1280.0, 720.0),
            reference_fps: 60.0,
            map: MapFiles::default(),
            graphics: GraphicsManifest::default(),
            hitbox_offsets: HitboxOffsets::default(),
            player: PlayerSettings::default(),
            enemy_timing: EnemyTiming::default(),
            weapons,
            magic,
            monsters,
            particles,
            audio: AudioSettings::default(),
        }
    }
}

impl GameSettings {
    /// Load settings from the RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(SETTINGS_PATH) {
            Ok(contents) => Self::from_ron(&contents).unwrap_or_else(|e| {
                error!("Failed to parse {}: {}. Using defaults.", SETTINGS_PATH, e);
                Self::default()
            }),
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", SETTINGS_PATH, e);
                Self::default()
            }
        }
    }

    /// Parse settings from RON text.
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Monster stats for a species, falling back to the built-in table.
    pub fn monster(&self, species: Species) -> MonsterData {
        self.monsters
            .get(&species)
            .cloned()
            .or_else(|| Self::default().monsters.remove(&species))
            .unwrap_or_else(|| MonsterData::new(100.0, 100, 20.0, AttackType::Slash, "", 3.0, 80.0, 360.0))
    }

    /// Particle animation data for a kind, falling back to a single 64px frame.
    pub fn particle(&self, kind: ParticleKind) -> ParticleData {
        self.particles
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ParticleData::single("", 1))
    }

    /// Weapon at a loadout index (wraps).
    pub fn weapon(&self, index: usize) -> Option<&WeaponData> {
        if self.weapons.is_empty() {
            return None;
        }
        self.weapons.get(index % self.weapons.len())
    }

    /// Spell at a loadout index (wraps).
    pub fn spell(&self, index: usize) -> Option<&MagicData> {
        if self.magic.is_empty() {
            return None;
        }
        self.magic.get(index % self.magic.len())
    }

    /// Scale a per-reference-frame amount to this frame's delta.
    pub fn per_frame(&self, amount: f32, delta_secs: f32) -> f32 {
        amount * self.reference_fps * delta_secs
    }
}

/// System to load settings at startup.
pub fn load_settings(mut commands: Commands) {
    let settings = GameSettings::load();
    info!(
        "Settings: tile size {}, viewport {}x{}",
        settings.tile_size, settings.viewport.0, settings.viewport.1
    );
    commands.insert_resource(settings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults_for_missing_fields() {
        let settings = GameSettings::from_ron("(tile_size: 32.0, viewport: (640.0, 480.0))")
            .expect("partial settings parse");

        assert_eq!(settings.tile_size, 32.0);
        assert_eq!(settings.viewport, (640.0, 480.0));
        assert_eq!(settings.weapons.len(), 5);
        assert_eq!(settings.player.invulnerability(), Duration::from_millis(500));
    }

    #[test]
    fn monster_table_overrides_parse() {
        let settings = GameSettings::from_ron(
            r#"(monsters: {
                Raccoon: (
                    health: 10.0, exp: 7, damage: 1.0, attack_type: Claw,
                    attack_sound: "a.wav", speed: 1.0,
                    attack_radius: 5.0, notice_radius: 9.0, size: (32.0, 32.0),
                ),
            })"#,
        )
        .expect("monster override parses");

        assert_eq!(settings.monster(Species::Raccoon).exp, 7);
        // Species missing from the file use the built-in row
        assert_eq!(settings.monster(Species::Bamboo).exp, 120);
    }

    #[test]
    fn loadout_indices_wrap() {
        let settings = GameSettings::default();
        assert_eq!(settings.weapon(5).map(|w| w.name.as_str()), Some("sword"));
        assert_eq!(settings.spell(1).map(|m| m.style), Some(MagicStyle::Heal));
        assert_eq!(settings.spell(2).map(|m| m.style), Some(MagicStyle::Flame));
    }

    #[test]
    fn per_frame_amounts_scale_with_delta() {
        let settings = GameSettings::default();
        assert!((settings.per_frame(5.0, 1.0 / 60.0) - 5.0).abs() < 1e-4);
        assert!((settings.per_frame(5.0, 1.0 / 30.0) - 10.0).abs() < 1e-4);
    }
}
