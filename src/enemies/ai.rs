//! Enemy AI behavior systems.

use bevy::prelude::*;

use super::components::{AiState, AttackCooldown, Enemy, EnemyStats};
use crate::combat::{Health, Invulnerability};
use crate::core::{
    DamagePlayerEvent, GameSettings, GrantExpEvent, ParticleLayer, PlaySoundEvent, SoundCue,
    SpawnParticlesEvent,
};
use crate::player::Player;
use crate::world::{move_with_collisions, Bounds, MoveDirection, Obstacle};

/// Distance and unit direction from `from` to `to`.
pub fn distance_direction(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let delta = to - from;
    (delta.length(), delta.normalize_or_zero())
}

/// Pick the AI state for a player at `distance`.
pub fn decide_state(distance: f32, stats: &EnemyStats, can_attack: bool) -> AiState {
    if distance <= stats.attack_radius && can_attack {
        AiState::Attacking
    } else if distance <= stats.notice_radius {
        AiState::Moving
    } else {
        AiState::Idle
    }
}

/// Re-arm attacks and end invulnerability windows.
pub fn enemy_cooldowns(
    time: Res<Time>,
    mut enemy_query: Query<(&mut AttackCooldown, &mut Invulnerability), With<Enemy>>,
) {
    let now = time.elapsed();
    for (mut cooldown, mut invulnerability) in enemy_query.iter_mut() {
        if !cooldown.can_attack && now.saturating_sub(cooldown.attack_time) >= cooldown.duration {
            cooldown.can_attack = true;
        }
        invulnerability.refresh(now);
    }
}

/// Choose idle, move or attack from the distance to the player.
pub fn enemy_status(
    player_query: Query<&Bounds, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<(&Bounds, &EnemyStats, &AttackCooldown, &mut AiState), With<Enemy>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for (bounds, stats, cooldown, mut ai_state) in enemy_query.iter_mut() {
        let (distance, _) = distance_direction(bounds.center(), player.center());
        let next = decide_state(distance, stats, cooldown.can_attack);
        if *ai_state != next {
            *ai_state = next;
        }
    }
}

/// Act on the current state.
///
/// Attacking locks the enemy out for its cooldown and asks for the player to
/// be damaged. While invulnerable after a hit the enemy is pushed away from
/// the player instead of following its state.
pub fn enemy_actions(
    time: Res<Time>,
    player_query: Query<&Bounds, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&Enemy, &Bounds, &EnemyStats, &AiState, &Invulnerability, &mut AttackCooldown, &mut MoveDirection),
    >,
    mut damage: EventWriter<DamagePlayerEvent>,
    mut sounds: EventWriter<PlaySoundEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let now = time.elapsed();

    for (enemy, bounds, stats, ai_state, invulnerability, mut cooldown, mut direction) in enemy_query.iter_mut() {
        let (_, toward_player) = distance_direction(bounds.center(), player.center());

        direction.0 = match ai_state {
            AiState::Attacking => {
                cooldown.attack_time = now;
                cooldown.can_attack = false;
                damage.send(DamagePlayerEvent {
                    amount: stats.damage,
                    attack_type: stats.attack_type,
                });
                sounds.send(PlaySoundEvent(SoundCue::EnemyAttack(enemy.species)));
                // Keeps the heading it had on the frame before
                direction.0
            }
            AiState::Moving => toward_player,
            AiState::Idle => Vec2::ZERO,
        };

        if !invulnerability.vulnerable {
            direction.0 = -toward_player;
        }
    }
}

/// Move enemies by their speed, blocked by obstacle hitboxes.
pub fn move_enemies(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut enemy_query: Query<(&mut Bounds, &MoveDirection, &EnemyStats), With<Enemy>>,
    obstacles: Query<&Bounds, (With<Obstacle>, Without<Enemy>)>,
) {
    let hitboxes: Vec<Rect> = obstacles.iter().map(|obstacle| obstacle.hitbox).collect();

    for (mut bounds, direction, stats) in enemy_query.iter_mut() {
        let distance = settings.per_frame(stats.speed, time.delta_secs());
        move_with_collisions(&mut bounds, direction.0, distance, &hitboxes);
    }
}

/// Remove dead enemies with particles, experience and a death sound.
pub fn check_enemy_deaths(
    mut commands: Commands,
    enemy_query: Query<(Entity, &Enemy, &Bounds, &Health, &EnemyStats)>,
    mut exp: EventWriter<GrantExpEvent>,
    mut particles: EventWriter<SpawnParticlesEvent>,
    mut sounds: EventWriter<PlaySoundEvent>,
) {
    for (entity, enemy, bounds, health, stats) in enemy_query.iter() {
        if !health.is_dead() {
            continue;
        }

        debug!("{} died, granting {} exp", enemy.species.name(), stats.exp);
        commands.entity(entity).despawn();
        particles.send(SpawnParticlesEvent {
            kind: enemy.species.death_particles(),
            position: bounds.center(),
            layer: ParticleLayer::Visible,
        });
        exp.send(GrantExpEvent { amount: stats.exp });
        sounds.send(PlaySoundEvent(SoundCue::Death));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::grant_experience;
    use crate::core::{ParticleKind, Species};
    use crate::enemies::spawning::spawn_enemy;
    use crate::player::Experience;
    use crate::testing::{advance_by, capture, captured, test_app, with_commands};
    use crate::world::rect_from_top_left;
    use std::time::Duration;

    fn squid_stats() -> EnemyStats {
        EnemyStats::from(&GameSettings::default().monster(Species::Squid))
    }

    #[test]
    fn state_follows_radii() {
        let stats = squid_stats();
        assert_eq!(decide_state(80.0, &stats, true), AiState::Attacking);
        assert_eq!(decide_state(80.0, &stats, false), AiState::Moving);
        assert_eq!(decide_state(360.0, &stats, true), AiState::Moving);
        assert_eq!(decide_state(360.5, &stats, true), AiState::Idle);
    }

    fn setup(player_at: Vec2) -> (App, Entity, Entity) {
        let mut app = test_app();
        app.add_systems(
            Update,
            (enemy_cooldowns, enemy_status, enemy_actions, move_enemies).chain(),
        );
        capture::<DamagePlayerEvent>(&mut app);

        let player = app
            .world_mut()
            .spawn((
                Player,
                Bounds::exact(rect_from_top_left(player_at, Vec2::splat(64.0))),
            ))
            .id();
        let settings = GameSettings::default();
        let enemy = with_commands(&mut app, |commands| {
            spawn_enemy(commands, Species::Squid, Vec2::ZERO, &settings, Handle::default())
        });
        (app, player, enemy)
    }

    #[test]
    fn attacks_once_per_cooldown() {
        let (mut app, _, enemy) = setup(Vec2::new(50.0, 0.0));

        app.update();
        app.update();
        assert_eq!(captured::<DamagePlayerEvent>(&app).len(), 1);
        assert_eq!(app.world().get::<AiState>(enemy).copied(), Some(AiState::Moving));

        advance_by(&mut app, Duration::from_millis(410));
        assert_eq!(captured::<DamagePlayerEvent>(&app).len(), 2);
        let hit = captured::<DamagePlayerEvent>(&app)[0];
        assert_eq!(hit.amount, 20.0);
    }

    #[test]
    fn attack_frame_keeps_previous_heading() {
        let (mut app, _, enemy) = setup(Vec2::new(50.0, 0.0));
        if let Some(mut direction) = app.world_mut().get_mut::<MoveDirection>(enemy) {
            direction.0 = Vec2::Y;
        }

        app.update();

        assert_eq!(captured::<DamagePlayerEvent>(&app).len(), 1);
        assert_eq!(app.world().get::<MoveDirection>(enemy).copied(), Some(MoveDirection(Vec2::Y)));
    }

    #[test]
    fn noticed_player_is_approached() {
        let (mut app, _, enemy) = setup(Vec2::new(300.0, 0.0));

        app.update();

        assert_eq!(app.world().get::<AiState>(enemy).copied(), Some(AiState::Moving));
        let x = app.world().get::<Bounds>(enemy).map(|b| b.rect.min.x);
        assert!(x.is_some_and(|x| x > 0.0));
    }

    #[test]
    fn hit_enemy_is_pushed_away() {
        let (mut app, _, enemy) = setup(Vec2::new(300.0, 0.0));
        if let Some(mut window) = app.world_mut().get_mut::<Invulnerability>(enemy) {
            window.vulnerable = false;
            window.hurt_time = Duration::from_secs(60);
        }

        app.update();

        let x = app.world().get::<Bounds>(enemy).map(|b| b.rect.min.x);
        assert!(x.is_some_and(|x| x < 0.0));
    }

    #[test]
    fn death_grants_exp_exactly_once() {
        let mut app = test_app();
        app.add_systems(Update, (check_enemy_deaths, grant_experience).chain());
        capture::<SpawnParticlesEvent>(&mut app);
        let player = app.world_mut().spawn((Player, Experience(0))).id();
        let settings = GameSettings::default();
        let enemy = with_commands(&mut app, |commands| {
            spawn_enemy(commands, Species::Raccoon, Vec2::ZERO, &settings, Handle::default())
        });
        if let Some(mut health) = app.world_mut().get_mut::<Health>(enemy) {
            health.current = -5.0;
        }

        app.update();
        app.update();

        assert_eq!(app.world().get::<Experience>(player).copied(), Some(Experience(250)));
        assert!(app.world().get::<Enemy>(enemy).is_none());
        let particles = captured::<SpawnParticlesEvent>(&app);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].kind, ParticleKind::Raccoon);
    }
}
