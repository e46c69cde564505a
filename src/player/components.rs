//! Player-related components.

use bevy::prelude::*;
use std::fmt;
use std::time::Duration;

use crate::core::{PlayerSettings, Stat, StatBlock};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Direction the player is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Unit vector in world space (y grows downward).
    pub fn vector(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::NEG_Y,
            Facing::Down => Vec2::Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Facing::Up => 0,
            Facing::Down => 1,
            Facing::Left => 2,
            Facing::Right => 3,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        };
        f.write_str(name)
    }
}

/// What the player is doing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Idle,
    Move,
    Attack,
}

/// `{facing}_{action}`; plain facing while moving, like "down" or "left_idle".
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub facing: Facing,
    pub action: Action,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Idle => write!(f, "{}_idle", self.facing),
            Action::Move => write!(f, "{}", self.facing),
            Action::Attack => write!(f, "{}_attack", self.facing),
        }
    }
}

/// Current stat values with their caps and upgrade costs.
#[derive(Component, Debug, Clone)]
pub struct PlayerStats {
    pub stats: StatBlock,
    pub max: StatBlock,
    pub cost: StatBlock,
}

impl PlayerStats {
    pub fn from_settings(settings: &PlayerSettings) -> Self {
        Self {
            stats: settings.stats,
            max: settings.max_stats,
            cost: settings.upgrade_cost,
        }
    }

    /// Spend experience on a stat.
    ///
    /// Fails when experience is short of the cost or the stat is already at
    /// its cap. On success the stat grows by 20% (clamped) and the next
    /// upgrade of that stat costs 40% more.
    pub fn upgrade(&mut self, stat: Stat, exp: &mut Experience) -> bool {
        let cost = self.cost.get(stat);
        let max = self.max.get(stat);
        let value = self.stats.get_mut(stat);

        if (exp.0 as f32) < cost || *value >= max {
            return false;
        }

        exp.0 -= cost as u32;
        *value = (*value * 1.2).min(max);
        *self.cost.get_mut(stat) = cost * 1.4;
        true
    }
}

/// Mana for spells, capped by the energy stat.
#[derive(Component, Debug, Clone, Copy)]
pub struct Energy {
    pub current: f32,
}

/// Experience points available for upgrades.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Experience(pub u32);

/// Melee/magic action lock.
///
/// While `attacking` the player ignores movement and new actions.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerAttack {
    pub attacking: bool,
    pub attack_time: Duration,
}

/// Selected weapon and spell with their switch cooldowns.
#[derive(Component, Debug, Clone, Copy)]
pub struct Loadout {
    pub weapon: usize,
    pub magic: usize,
    pub can_switch_weapon: bool,
    pub weapon_switch_time: Duration,
    pub can_switch_magic: bool,
    pub magic_switch_time: Duration,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            weapon: 0,
            magic: 0,
            can_switch_weapon: true,
            weapon_switch_time: Duration::ZERO,
            can_switch_magic: true,
            magic_switch_time: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings() {
        let status = Status {
            facing: Facing::Left,
            action: Action::Idle,
        };
        assert_eq!(status.to_string(), "left_idle");
        assert_eq!(
            Status { facing: Facing::Up, action: Action::Move }.to_string(),
            "up"
        );
        assert_eq!(
            Status { facing: Facing::Right, action: Action::Attack }.to_string(),
            "right_attack"
        );
    }

    #[test]
    fn upgrade_spends_exp_and_raises_cost() {
        let mut stats = PlayerStats::from_settings(&PlayerSettings::default());
        let mut exp = Experience(500);

        assert!(stats.upgrade(Stat::Attack, &mut exp));
        assert_eq!(exp.0, 400);
        assert!((stats.stats.attack - 12.0).abs() < 1e-4);
        assert!((stats.cost.attack - 140.0).abs() < 1e-4);
    }

    #[test]
    fn upgrade_is_denied_without_exp_or_at_cap() {
        let mut stats = PlayerStats::from_settings(&PlayerSettings::default());

        let mut poor = Experience(99);
        assert!(!stats.upgrade(Stat::Health, &mut poor));
        assert_eq!(poor.0, 99);

        stats.stats.speed = stats.max.speed;
        let mut rich = Experience(1000);
        assert!(!stats.upgrade(Stat::Speed, &mut rich));
        assert_eq!(rich.0, 1000);
    }

    #[test]
    fn upgrade_clamps_to_max() {
        let mut stats = PlayerStats::from_settings(&PlayerSettings::default());
        stats.stats.magic = 9.5;
        let mut exp = Experience(500);

        assert!(stats.upgrade(Stat::Magic, &mut exp));
        assert_eq!(stats.stats.magic, 10.0);
    }
}
