//! One-shot particle animations.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::core::{GameRng, GameSettings, ParticleKind, ParticleLayer, SpawnParticlesEvent};
use crate::world::{AttackSprite, Bounds, LevelGeometry, SpriteType, VisibleSprite};

/// Frame images per particle kind; each kind has one or more frame folders.
#[derive(Resource, Debug, Default)]
pub struct ParticleLibrary {
    frames: HashMap<ParticleKind, Vec<Vec<Handle<Image>>>>,
}

impl ParticleLibrary {
    /// Load `{folder}/{i}.png` for every configured folder and frame.
    pub fn load(settings: &GameSettings, asset_server: &AssetServer) -> Self {
        let frames = settings
            .particles
            .iter()
            .map(|(kind, data)| {
                let folders = data
                    .folders
                    .iter()
                    .map(|folder| {
                        (0..data.frames)
                            .map(|i| asset_server.load(format!("{folder}/{i}.png")))
                            .collect()
                    })
                    .collect();
                (*kind, folders)
            })
            .collect();
        Self { frames }
    }

    pub fn frames(&self, kind: ParticleKind, folder: usize) -> Vec<Handle<Image>> {
        self.frames
            .get(&kind)
            .and_then(|folders| folders.get(folder))
            .cloned()
            .unwrap_or_default()
    }
}

/// Playback state of a particle; the entity is removed after the last frame.
#[derive(Component, Debug, Clone)]
pub struct ParticleAnimation {
    pub frames: Vec<Handle<Image>>,
    pub frame_count: usize,
    pub frame_secs: f32,
    pub elapsed: f32,
}

impl ParticleAnimation {
    pub fn frame_index(&self) -> usize {
        if self.frame_secs <= 0.0 {
            return self.frame_count;
        }
        (self.elapsed / self.frame_secs) as usize
    }

    pub fn finished(&self) -> bool {
        self.frame_index() >= self.frame_count
    }
}

/// Spawn requested particles.
///
/// Each spawn picks one of the kind's frame folders at random; leaves are
/// also mirrored at random. Attack-layer particles hit attackables.
pub fn spawn_particles(
    mut commands: Commands,
    mut events: EventReader<SpawnParticlesEvent>,
    settings: Res<GameSettings>,
    library: Option<Res<ParticleLibrary>>,
    mut rng: ResMut<GameRng>,
) {
    for event in events.read() {
        let data = settings.particle(event.kind);
        let folder = match data.folders.len() {
            0 => 0,
            count => rng.0.gen_range(0..count),
        };
        let frames = library
            .as_ref()
            .map(|library| library.frames(event.kind, folder))
            .unwrap_or_default();
        let flip_x = event.kind == ParticleKind::Leaf && rng.0.gen_bool(0.5);

        let size = Vec2::new(data.size.0, data.size.1);
        let rect = Rect::from_center_size(event.position, size);
        let sprite_type = match event.layer {
            ParticleLayer::Visible => SpriteType::Particle,
            ParticleLayer::VisibleAndAttack => SpriteType::Magic,
        };

        let mut particle = commands.spawn((
            sprite_type,
            VisibleSprite,
            Bounds::exact(rect),
            Sprite {
                image: frames.first().cloned().unwrap_or_default(),
                custom_size: Some(size),
                anchor: bevy::sprite::Anchor::TopLeft,
                flip_x,
                ..default()
            },
            ParticleAnimation {
                frames,
                frame_count: data.frames,
                frame_secs: data.frame_secs,
                elapsed: 0.0,
            },
            LevelGeometry,
        ));
        if event.layer == ParticleLayer::VisibleAndAttack {
            particle.insert(AttackSprite);
        }
    }
}

/// Advance particle frames and remove finished particles.
pub fn animate_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut ParticleAnimation, &mut Sprite)>,
) {
    for (entity, mut animation, mut sprite) in particles.iter_mut() {
        animation.elapsed += time.delta_secs();
        if animation.finished() {
            commands.entity(entity).despawn();
            continue;
        }
        if let Some(frame) = animation.frames.get(animation.frame_index()) {
            if sprite.image != *frame {
                sprite.image = frame.clone();
            }
        }
    }
}
