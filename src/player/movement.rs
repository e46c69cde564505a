//! Player input, actions, cooldowns and movement.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{Health, Invulnerability};
use crate::core::{
    AttackRequest, FrameSet, GameSettings, MagicRequest, PlaySoundEvent, PlayerCommand, SoundCue,
};
use crate::world::{
    move_with_collisions, rect_from_top_left, Bounds, LevelGeometry, MoveDirection, Obstacle,
    SpriteType, VisibleSprite,
};

/// Set up player systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(Update, keyboard_input.in_set(FrameSet::Input))
        .add_systems(
            Update,
            (
                apply_player_commands,
                player_cooldowns,
                update_player_status,
                move_player,
                recover_energy,
            )
                .chain()
                .in_set(FrameSet::Simulate),
        );
}

/// Translate keyboard state into player commands.
///
/// Arrows move, space attacks, left ctrl casts, q/e cycle weapon/spell.
pub fn keyboard_input(keyboard: Res<ButtonInput<KeyCode>>, mut commands: EventWriter<PlayerCommand>) {
    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowUp) {
        direction.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    commands.send(PlayerCommand::Move(direction));

    if keyboard.pressed(KeyCode::Space) {
        commands.send(PlayerCommand::Attack);
    }
    if keyboard.pressed(KeyCode::ControlLeft) {
        commands.send(PlayerCommand::CastMagic);
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        commands.send(PlayerCommand::NextWeapon);
    }
    if keyboard.pressed(KeyCode::KeyE) {
        commands.send(PlayerCommand::NextMagic);
    }
}

/// Apply this frame's commands. Everything is ignored while attacking.
pub fn apply_player_commands(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut commands: EventReader<PlayerCommand>,
    mut player_query: Query<
        (&PlayerStats, &mut PlayerAttack, &mut Loadout, &mut MoveDirection),
        With<Player>,
    >,
    mut attack_requests: EventWriter<AttackRequest>,
    mut magic_requests: EventWriter<MagicRequest>,
    mut sounds: EventWriter<PlaySoundEvent>,
) {
    let Ok((stats, mut attack, mut loadout, mut direction)) = player_query.get_single_mut() else {
        commands.clear();
        return;
    };
    let now = time.elapsed();

    for command in commands.read() {
        if attack.attacking {
            continue;
        }

        match *command {
            PlayerCommand::Move(desired) => direction.0 = desired,
            PlayerCommand::Attack => {
                attack.attacking = true;
                attack.attack_time = now;
                attack_requests.send(AttackRequest::Create);
                sounds.send(PlaySoundEvent(SoundCue::WeaponSwing));
            }
            PlayerCommand::CastMagic => {
                let Some(spell) = settings.spell(loadout.magic) else {
                    continue;
                };
                attack.attacking = true;
                attack.attack_time = now;
                magic_requests.send(MagicRequest {
                    style: spell.style,
                    strength: spell.strength + stats.stats.magic,
                    cost: spell.cost,
                });
            }
            PlayerCommand::NextWeapon if loadout.can_switch_weapon => {
                loadout.weapon = (loadout.weapon + 1) % settings.weapons.len().max(1);
                loadout.can_switch_weapon = false;
                loadout.weapon_switch_time = now;
            }
            PlayerCommand::NextMagic if loadout.can_switch_magic => {
                loadout.magic = (loadout.magic + 1) % settings.magic.len().max(1);
                loadout.can_switch_magic = false;
                loadout.magic_switch_time = now;
            }
            PlayerCommand::NextWeapon | PlayerCommand::NextMagic => {}
        }
    }
}

/// End attacks and switch locks once their windows pass.
pub fn player_cooldowns(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut player_query: Query<(&mut PlayerAttack, &mut Loadout, &mut Invulnerability), With<Player>>,
    mut attack_requests: EventWriter<AttackRequest>,
) {
    let now = time.elapsed();
    let switch_cooldown = settings.player.switch_cooldown();

    for (mut attack, mut loadout, mut invulnerability) in player_query.iter_mut() {
        if attack.attacking {
            let weapon_cooldown = settings
                .weapon(loadout.weapon)
                .map(|weapon| weapon.cooldown())
                .unwrap_or_default();
            if now.saturating_sub(attack.attack_time) >= settings.player.attack_cooldown() + weapon_cooldown {
                attack.attacking = false;
                attack_requests.send(AttackRequest::Destroy);
            }
        }

        if !loadout.can_switch_weapon && now.saturating_sub(loadout.weapon_switch_time) >= switch_cooldown {
            loadout.can_switch_weapon = true;
        }
        if !loadout.can_switch_magic && now.saturating_sub(loadout.magic_switch_time) >= switch_cooldown {
            loadout.can_switch_magic = true;
        }

        invulnerability.refresh(now);
    }
}

/// Derive facing and action from the movement direction.
///
/// A horizontal component wins the facing over a vertical one.
pub fn update_player_status(
    mut player_query: Query<(&PlayerAttack, &mut MoveDirection, &mut Status), With<Player>>,
) {
    for (attack, mut direction, mut status) in player_query.iter_mut() {
        if direction.0.y < 0.0 {
            status.facing = Facing::Up;
        } else if direction.0.y > 0.0 {
            status.facing = Facing::Down;
        }
        if direction.0.x > 0.0 {
            status.facing = Facing::Right;
        } else if direction.0.x < 0.0 {
            status.facing = Facing::Left;
        }

        status.action = if attack.attacking {
            direction.0 = Vec2::ZERO;
            Action::Attack
        } else if direction.0 == Vec2::ZERO {
            Action::Idle
        } else {
            Action::Move
        };
    }
}

/// Move the player by its speed stat, blocked by obstacle hitboxes.
pub fn move_player(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut player_query: Query<(&mut Bounds, &MoveDirection, &PlayerStats), With<Player>>,
    obstacles: Query<&Bounds, (With<Obstacle>, Without<Player>)>,
) {
    let Ok((mut bounds, direction, stats)) = player_query.get_single_mut() else {
        return;
    };
    if direction.0 == Vec2::ZERO {
        return;
    }

    let hitboxes: Vec<Rect> = obstacles.iter().map(|obstacle| obstacle.hitbox).collect();
    let distance = settings.per_frame(stats.stats.speed, time.delta_secs());
    move_with_collisions(&mut bounds, direction.0, distance, &hitboxes);
}

/// Regain energy proportional to the magic stat, capped by the energy stat.
pub fn recover_energy(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut player_query: Query<(&mut Energy, &PlayerStats), With<Player>>,
) {
    for (mut energy, stats) in player_query.iter_mut() {
        let gain = settings.per_frame(settings.player.energy_recovery * stats.stats.magic, time.delta_secs());
        energy.current = (energy.current + gain).min(stats.stats.energy);
    }
}

/// Spawn the player at the top-left of its spawn cell.
pub fn spawn_player(commands: &mut Commands, position: Vec2, settings: &GameSettings, image: Handle<Image>) -> Entity {
    let player_settings = &settings.player;
    let size = Vec2::new(player_settings.size.0, player_settings.size.1);
    let (dx, dy) = settings.hitbox_offsets.player;
    let stats = PlayerStats::from_settings(player_settings);

    commands
        .spawn((
            Player,
            SpriteType::Player,
            VisibleSprite,
            Bounds::new(rect_from_top_left(position, size), Vec2::new(dx, dy)),
            MoveDirection::default(),
            Status::default(),
            Health::new(stats.stats.health),
            Energy {
                current: stats.stats.energy,
            },
            Experience(player_settings.starting_exp),
            PlayerAttack::default(),
            Loadout::default(),
            Invulnerability::new(player_settings.invulnerability()),
            stats,
            LevelGeometry,
        ))
        .insert(Sprite {
            image,
            custom_size: Some(size),
            anchor: bevy::sprite::Anchor::TopLeft,
            ..default()
        })
        .id()
}
