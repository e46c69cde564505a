//! Heal and flame spells.

use bevy::prelude::*;
use rand::Rng;

use super::components::Health;
use crate::core::{
    GameRng, GameSettings, MagicRequest, MagicStyle, ParticleKind, ParticleLayer, PlaySoundEvent,
    SoundCue, SpawnParticlesEvent,
};
use crate::player::{Energy, Player, Status};
use crate::world::Bounds;

/// Number of flame bursts per cast.
pub const FLAME_BURSTS: i32 = 5;

/// Vertical lift of the heal sparkle above the player center.
const HEAL_SPARKLE_OFFSET: f32 = 60.0;

/// Burst positions of a flame cast.
///
/// Burst `i` sits `i` tiles from `center` along `facing`, jittered on both
/// axes by a whole number of pixels within a quarter tile.
pub fn flame_positions(center: Vec2, facing: Vec2, tile_size: f32, rng: &mut impl Rng) -> Vec<Vec2> {
    let spread = (tile_size / 4.0) as i32;
    (1..=FLAME_BURSTS)
        .map(|i| {
            let jitter = Vec2::new(
                rng.gen_range(-spread..=spread) as f32,
                rng.gen_range(-spread..=spread) as f32,
            );
            center + facing * (i as f32 * tile_size) + jitter
        })
        .collect()
}

/// Cast requested spells. Casting without enough energy does nothing.
pub fn handle_magic_requests(
    mut requests: EventReader<MagicRequest>,
    settings: Res<GameSettings>,
    mut rng: ResMut<GameRng>,
    mut player_query: Query<(&Bounds, &Status, &mut Health, &mut Energy), With<Player>>,
    mut particles: EventWriter<SpawnParticlesEvent>,
    mut sounds: EventWriter<PlaySoundEvent>,
) {
    let Ok((bounds, status, mut health, mut energy)) = player_query.get_single_mut() else {
        requests.clear();
        return;
    };
    let center = bounds.center();

    for request in requests.read() {
        if energy.current < request.cost {
            debug!("Not enough energy for {:?}", request.style);
            continue;
        }
        energy.current -= request.cost;

        match request.style {
            MagicStyle::Heal => {
                health.heal(request.strength);
                particles.send(SpawnParticlesEvent {
                    kind: ParticleKind::Aura,
                    position: center,
                    layer: ParticleLayer::Visible,
                });
                particles.send(SpawnParticlesEvent {
                    kind: ParticleKind::Heal,
                    position: center - Vec2::new(0.0, HEAL_SPARKLE_OFFSET),
                    layer: ParticleLayer::Visible,
                });
                sounds.send(PlaySoundEvent(SoundCue::Heal));
            }
            MagicStyle::Flame => {
                let facing = status.facing.vector();
                for position in flame_positions(center, facing, settings.tile_size, &mut rng.0) {
                    particles.send(SpawnParticlesEvent {
                        kind: ParticleKind::Flame,
                        position,
                        layer: ParticleLayer::VisibleAndAttack,
                    });
                }
                sounds.send(PlaySoundEvent(SoundCue::Flame));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture, captured, test_app};
    use crate::world::rect_from_top_left;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn flame_bursts_march_along_facing() {
        let mut rng = StdRng::seed_from_u64(3);
        let center = Vec2::new(100.0, 100.0);
        let positions = flame_positions(center, Vec2::X, 64.0, &mut rng);

        assert_eq!(positions.len(), 5);
        for (i, position) in positions.iter().enumerate() {
            let expected = center + Vec2::new(64.0 * (i as f32 + 1.0), 0.0);
            let jitter = *position - expected;
            assert!(jitter.x.abs() <= 16.0 && jitter.y.abs() <= 16.0);
            assert_eq!(jitter.x.fract(), 0.0);
        }
    }

    fn cast(health: f32, energy: f32, request: MagicRequest) -> (App, Entity) {
        let mut app = test_app();
        app.add_systems(Update, handle_magic_requests);
        capture::<SpawnParticlesEvent>(&mut app);
        capture::<PlaySoundEvent>(&mut app);
        let player = app
            .world_mut()
            .spawn((
                Player,
                Bounds::exact(rect_from_top_left(Vec2::ZERO, Vec2::splat(64.0))),
                Status::default(),
                Health {
                    current: health,
                    maximum: 100.0,
                },
                Energy { current: energy },
            ))
            .id();
        app.world_mut().send_event(request);
        app.update();
        (app, player)
    }

    #[test]
    fn heal_never_exceeds_max() {
        let (app, player) = cast(
            90.0,
            60.0,
            MagicRequest {
                style: MagicStyle::Heal,
                strength: 50.0,
                cost: 10.0,
            },
        );

        assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(100.0));
        assert_eq!(app.world().get::<Energy>(player).map(|e| e.current), Some(50.0));

        let kinds: Vec<_> = captured::<SpawnParticlesEvent>(&app)
            .iter()
            .map(|event| (event.kind, event.position))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ParticleKind::Aura, Vec2::new(32.0, 32.0)),
                (ParticleKind::Heal, Vec2::new(32.0, -28.0)),
            ]
        );
        assert_eq!(captured::<PlaySoundEvent>(&app), vec![PlaySoundEvent(SoundCue::Heal)]);
    }

    #[test]
    fn flame_without_energy_does_nothing() {
        let (app, player) = cast(
            100.0,
            5.0,
            MagicRequest {
                style: MagicStyle::Flame,
                strength: 9.0,
                cost: 10.0,
            },
        );

        assert!(captured::<SpawnParticlesEvent>(&app).is_empty());
        assert_eq!(app.world().get::<Energy>(player).map(|e| e.current), Some(5.0));
    }

    #[test]
    fn flame_bursts_are_attack_particles() {
        let (app, player) = cast(
            100.0,
            60.0,
            MagicRequest {
                style: MagicStyle::Flame,
                strength: 9.0,
                cost: 20.0,
            },
        );

        let bursts = captured::<SpawnParticlesEvent>(&app);
        assert_eq!(bursts.len(), 5);
        assert!(bursts
            .iter()
            .all(|b| b.kind == ParticleKind::Flame && b.layer == ParticleLayer::VisibleAndAttack));
        // default status faces down
        assert!(bursts[4].position.y > bursts[0].position.y);
        assert_eq!(app.world().get::<Energy>(player).map(|e| e.current), Some(40.0));
    }
}
