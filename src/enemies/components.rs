//! Enemy-related components.

use bevy::prelude::*;
use std::time::Duration;

use crate::core::{AttackType, MonsterData, Species};

/// Marker component for all enemies, carrying the species.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub species: Species,
}

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Player is out of notice range.
    #[default]
    Idle,
    /// Walking toward the player.
    Moving,
    /// Striking the player this frame.
    Attacking,
}

/// Species stats copied from the monster table at spawn.
#[derive(Component, Debug, Clone)]
pub struct EnemyStats {
    pub exp: u32,
    pub damage: f32,
    pub attack_type: AttackType,
    /// Pixels per reference frame
    pub speed: f32,
    pub attack_radius: f32,
    pub notice_radius: f32,
}

impl From<&MonsterData> for EnemyStats {
    fn from(data: &MonsterData) -> Self {
        Self {
            exp: data.exp,
            damage: data.damage,
            attack_type: data.attack_type,
            speed: data.speed,
            attack_radius: data.attack_radius,
            notice_radius: data.notice_radius,
        }
    }
}

/// Lockout between two enemy attacks.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackCooldown {
    pub can_attack: bool,
    pub attack_time: Duration,
    pub duration: Duration,
}

impl AttackCooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            can_attack: true,
            attack_time: Duration::ZERO,
            duration,
        }
    }
}
