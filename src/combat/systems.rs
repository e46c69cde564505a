//! Attack lifecycle, collision resolution and damage.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

use super::components::*;
use crate::core::{
    AttackKind, AttackRequest, DamagePlayerEvent, GameRng, GameSettings, GameState, GrantExpEvent,
    HitEvent, ParticleKind, ParticleLayer, PlaySoundEvent, SoundCue, SpawnParticlesEvent,
};
use crate::enemies::Enemy;
use crate::player::{Experience, Facing, Loadout, Player, PlayerStats, Status};
use crate::world::{
    overlaps, Attackable, AttackSprite, Bounds, GraphicsLookup, LevelGeometry, SpriteType,
    VisibleSprite,
};

/// Leaves scattered by a cut grass tile, inclusive.
const LEAF_COUNT: (u32, u32) = (3, 6);

/// How far above the grass center the leaves start.
const LEAF_LIFT: f32 = 75.0;

/// Weapon hitbox beside the owner's rectangle.
///
/// `size` is the hitbox when swung sideways; it is rotated for up/down.
pub fn weapon_rect(owner: Rect, facing: Facing, size: Vec2) -> Rect {
    let center = owner.center();
    match facing {
        Facing::Right => Rect::from_center_size(
            Vec2::new(owner.max.x + size.x / 2.0, center.y + 16.0),
            size,
        ),
        Facing::Left => Rect::from_center_size(
            Vec2::new(owner.min.x - size.x / 2.0, center.y + 16.0),
            size,
        ),
        Facing::Down => Rect::from_center_size(
            Vec2::new(center.x - 10.0, owner.max.y + size.x / 2.0),
            Vec2::new(size.y, size.x),
        ),
        Facing::Up => Rect::from_center_size(
            Vec2::new(center.x - 10.0, owner.min.y - size.x / 2.0),
            Vec2::new(size.y, size.x),
        ),
    }
}

/// Create and destroy the player's melee hitbox.
///
/// At most one hitbox is alive: creating replaces the previous one, and
/// destroying without a live hitbox does nothing.
pub fn handle_attack_requests(
    mut commands: Commands,
    mut requests: EventReader<AttackRequest>,
    mut current: ResMut<CurrentAttack>,
    settings: Res<GameSettings>,
    graphics: Option<Res<GraphicsLookup>>,
    player_query: Query<(&Bounds, &Status, &Loadout), With<Player>>,
) {
    for request in requests.read() {
        if let Some(previous) = current.0.take() {
            if let Some(mut entity) = commands.get_entity(previous) {
                entity.despawn();
            }
        }

        if *request == AttackRequest::Destroy {
            continue;
        }

        let Ok((bounds, status, loadout)) = player_query.get_single() else {
            continue;
        };
        let Some(weapon) = settings.weapon(loadout.weapon) else {
            continue;
        };

        let size = Vec2::new(weapon.size.0, weapon.size.1);
        let rect = weapon_rect(bounds.rect, status.facing, size);
        let image = graphics
            .as_ref()
            .map(|graphics| graphics.weapon(loadout.weapon, status.facing))
            .unwrap_or_default();

        let attack = commands
            .spawn((
                WeaponAttack,
                SpriteType::Weapon,
                VisibleSprite,
                AttackSprite,
                Bounds::exact(rect),
                Sprite {
                    image,
                    custom_size: Some(rect.size()),
                    anchor: bevy::sprite::Anchor::TopLeft,
                    ..default()
                },
                LevelGeometry,
            ))
            .id();
        current.0 = Some(attack);
    }
}

/// Test every attack sprite against every attackable sprite.
///
/// Grass is cut on contact (once per pass, however many attacks touch it);
/// everything else receives a `HitEvent`.
pub fn resolve_attack_collisions(
    mut commands: Commands,
    mut rng: ResMut<GameRng>,
    attacks: Query<(Entity, &Bounds, &SpriteType), With<AttackSprite>>,
    targets: Query<(Entity, &Bounds, &SpriteType), With<Attackable>>,
    mut hits: EventWriter<HitEvent>,
    mut particles: EventWriter<SpawnParticlesEvent>,
) {
    let mut destroyed = HashSet::new();

    for (attacker, attack_bounds, attack_type) in attacks.iter() {
        let kind = match attack_type {
            SpriteType::Magic => AttackKind::Magic,
            _ => AttackKind::Weapon,
        };

        for (target, target_bounds, target_type) in targets.iter() {
            if target == attacker || !overlaps(attack_bounds.rect, target_bounds.rect) {
                continue;
            }

            if *target_type != SpriteType::Grass {
                hits.send(HitEvent { target, kind });
                continue;
            }

            if !destroyed.insert(target) {
                continue;
            }
            commands.entity(target).despawn();

            let position = target_bounds.center() - Vec2::new(0.0, LEAF_LIFT);
            for _ in 0..rng.0.gen_range(LEAF_COUNT.0..=LEAF_COUNT.1) {
                particles.send(SpawnParticlesEvent {
                    kind: ParticleKind::Leaf,
                    position,
                    layer: ParticleLayer::Visible,
                });
            }
        }
    }
}

/// Apply player attacks to enemies that are currently vulnerable.
pub fn apply_enemy_damage(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut hits: EventReader<HitEvent>,
    player_query: Query<(&PlayerStats, &Loadout), With<Player>>,
    mut enemy_query: Query<(&mut Health, &mut Invulnerability), With<Enemy>>,
    mut sounds: EventWriter<PlaySoundEvent>,
) {
    let Ok((stats, loadout)) = player_query.get_single() else {
        hits.clear();
        return;
    };
    let now = time.elapsed();

    for hit in hits.read() {
        let Ok((mut health, mut invulnerability)) = enemy_query.get_mut(hit.target) else {
            continue;
        };
        if !invulnerability.try_hit(now) {
            continue;
        }

        let damage = match hit.kind {
            AttackKind::Weapon => {
                stats.stats.attack + settings.weapon(loadout.weapon).map_or(0.0, |w| w.damage)
            }
            AttackKind::Magic => {
                stats.stats.magic + settings.spell(loadout.magic).map_or(0.0, |m| m.strength)
            }
        };
        health.take_damage(damage);
        sounds.send(PlaySoundEvent(SoundCue::Hit));
    }
}

/// Apply enemy attacks to the player unless it is invulnerable.
pub fn apply_player_damage(
    time: Res<Time>,
    mut events: EventReader<DamagePlayerEvent>,
    mut player_query: Query<(&Bounds, &mut Health, &mut Invulnerability), With<Player>>,
    mut particles: EventWriter<SpawnParticlesEvent>,
) {
    let Ok((bounds, mut health, mut invulnerability)) = player_query.get_single_mut() else {
        events.clear();
        return;
    };
    let now = time.elapsed();

    for event in events.read() {
        if !invulnerability.try_hit(now) {
            continue;
        }
        health.take_damage(event.amount);
        particles.send(SpawnParticlesEvent {
            kind: event.attack_type.particles(),
            position: bounds.center(),
            layer: ParticleLayer::Visible,
        });
    }
}

/// Credit experience from kills.
pub fn grant_experience(
    mut grants: EventReader<GrantExpEvent>,
    mut player_query: Query<&mut Experience, With<Player>>,
) {
    let Ok(mut exp) = player_query.get_single_mut() else {
        grants.clear();
        return;
    };
    for grant in grants.read() {
        exp.0 += grant.amount;
    }
}

/// End the game once the player runs out of health.
pub fn check_player_death(
    player_query: Query<&Health, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    if health.is_dead() {
        info!("Player died! Transitioning to Game Over...");
        next_state.set(GameState::GameOver);
    }
}
