//! Global events used for cross-entity communication.
//!
//! Entities never hold references into the level. The player asks for attacks
//! and spells, enemies ask for the player to be damaged, and the level systems
//! answer those requests. Everything visual or audible is a fire-and-forget
//! event consumed by the effect collaborators.

use bevy::prelude::*;

use super::data::{AttackType, MagicStyle, ParticleKind, SoundCue, Stat};

/// How an attack sprite damages what it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    /// Melee weapon swing - uses the player's weapon damage
    Weapon,
    /// Flame burst - uses the player's magic damage
    Magic,
}

/// Input translated into what the player wants to do this frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Desired movement direction (not normalized, may be zero)
    Move(Vec2),
    Attack,
    CastMagic,
    NextWeapon,
    NextMagic,
}

/// Player-side request for the level to create or remove the melee hitbox.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRequest {
    Create,
    Destroy,
}

/// Player-side request for the level to cast a spell.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MagicRequest {
    pub style: MagicStyle,
    pub strength: f32,
    pub cost: f32,
}

/// An enemy attack landing on the player.
///
/// Ignored while the player is invulnerable.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamagePlayerEvent {
    pub amount: f32,
    pub attack_type: AttackType,
}

/// An attack sprite overlapping a non-grass attackable entity.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    /// Entity receiving the hit
    pub target: Entity,
    pub kind: AttackKind,
}

/// Experience granted to the player (enemy kills).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantExpEvent {
    pub amount: u32,
}

/// Which sprite sets a spawned particle joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleLayer {
    /// Drawn only
    #[default]
    Visible,
    /// Drawn and tested against attackables (flame)
    VisibleAndAttack,
}

/// Request for a one-shot particle animation at a world position.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SpawnParticlesEvent {
    pub kind: ParticleKind,
    /// World-space center of the effect
    pub position: Vec2,
    pub layer: ParticleLayer,
}

/// Request for a sound cue.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySoundEvent(pub SoundCue);

/// Request to spend experience on a stat (sent by the upgrade overlay).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeRequest(pub Stat);
