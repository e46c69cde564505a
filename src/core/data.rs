//! Closed vocabularies shared by the data tables and the gameplay systems.

use serde::Deserialize;
use std::fmt;

/// Enemy species selected by the entities layer of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Species {
    Bamboo,
    Spirit,
    Raccoon,
    Squid,
}

impl Species {
    /// Map an entities-layer code to a species.
    ///
    /// Anything that is not one of the known codes is a squid, including
    /// codes that are not numbers at all. The player code is handled before
    /// this is called.
    pub fn from_code(code: &str) -> Self {
        match code {
            "390" => Species::Bamboo,
            "391" => Species::Spirit,
            "392" => Species::Raccoon,
            _ => Species::Squid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Bamboo => "bamboo",
            Species::Spirit => "spirit",
            Species::Raccoon => "raccoon",
            Species::Squid => "squid",
        }
    }

    /// Particle style played when this species dies.
    pub fn death_particles(self) -> ParticleKind {
        match self {
            Species::Bamboo => ParticleKind::Bamboo,
            Species::Spirit => ParticleKind::Spirit,
            Species::Raccoon => ParticleKind::Raccoon,
            Species::Squid => ParticleKind::Squid,
        }
    }
}

/// Style of an enemy attack, which also picks the hit particle on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AttackType {
    Slash,
    Claw,
    Thunder,
    LeafAttack,
}

impl AttackType {
    pub fn particles(self) -> ParticleKind {
        match self {
            AttackType::Slash => ParticleKind::Slash,
            AttackType::Claw => ParticleKind::Claw,
            AttackType::Thunder => ParticleKind::Thunder,
            AttackType::LeafAttack => ParticleKind::LeafAttack,
        }
    }
}

/// Spell styles the player can cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum MagicStyle {
    Flame,
    Heal,
}

/// Every one-shot animation the effect layer knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ParticleKind {
    // magic
    Flame,
    Aura,
    Heal,
    // enemy attacks
    Claw,
    Slash,
    Thunder,
    LeafAttack,
    // enemy deaths
    Squid,
    Raccoon,
    Spirit,
    Bamboo,
    // grass clippings
    Leaf,
}

/// Sound cues the core asks the audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    WeaponSwing,
    Heal,
    Flame,
    Hit,
    Death,
    EnemyAttack(Species),
}

/// Upgradable player statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Stat {
    Health,
    Energy,
    Attack,
    Magic,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 5] = [Stat::Health, Stat::Energy, Stat::Attack, Stat::Magic, Stat::Speed];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stat::Health => "health",
            Stat::Energy => "energy",
            Stat::Attack => "attack",
            Stat::Magic => "magic",
            Stat::Speed => "speed",
        };
        f.write_str(name)
    }
}

/// One value per `Stat`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StatBlock {
    pub health: f32,
    pub energy: f32,
    pub attack: f32,
    pub magic: f32,
    pub speed: f32,
}

impl StatBlock {
    pub fn get(&self, stat: Stat) -> f32 {
        match stat {
            Stat::Health => self.health,
            Stat::Energy => self.energy,
            Stat::Attack => self.attack,
            Stat::Magic => self.magic,
            Stat::Speed => self.speed,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut f32 {
        match stat {
            Stat::Health => &mut self.health,
            Stat::Energy => &mut self.energy,
            Stat::Attack => &mut self.attack,
            Stat::Magic => &mut self.magic,
            Stat::Speed => &mut self.speed,
        }
    }

    pub fn splat(value: f32) -> Self {
        Self {
            health: value,
            energy: value,
            attack: value,
            magic: value,
            speed: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_codes_fall_back_to_squid() {
        assert_eq!(Species::from_code("390"), Species::Bamboo);
        assert_eq!(Species::from_code("391"), Species::Spirit);
        assert_eq!(Species::from_code("392"), Species::Raccoon);
        assert_eq!(Species::from_code("393"), Species::Squid);
        assert_eq!(Species::from_code("12"), Species::Squid);
        assert_eq!(Species::from_code("x"), Species::Squid);
    }

    #[test]
    fn stat_block_accessors_agree() {
        let mut block = StatBlock::splat(1.0);
        *block.get_mut(Stat::Magic) = 7.0;
        assert_eq!(block.get(Stat::Magic), 7.0);
        assert_eq!(block.magic, 7.0);
        assert_eq!(block.get(Stat::Speed), 1.0);
    }
}
