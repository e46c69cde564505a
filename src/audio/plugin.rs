//! Audio plugin - sound cues and background music through kira.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use std::collections::HashMap;

use crate::core::{FrameSet, GameSettings, GameState, PlaySoundEvent, SoundCue, Species};

/// Audio plugin - plays the cues the simulation asks for.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), (load_sounds, start_music).chain())
            .add_systems(Update, play_sound_cues.in_set(FrameSet::Effects));
    }
}

/// Handles for every sound cue.
#[derive(Resource)]
pub struct SoundLibrary {
    cues: HashMap<SoundCue, Handle<AudioSource>>,
    music: Handle<AudioSource>,
}

impl SoundLibrary {
    pub fn load(settings: &GameSettings, asset_server: &AssetServer) -> Self {
        let audio = &settings.audio;
        let mut cues = HashMap::from([
            (SoundCue::WeaponSwing, asset_server.load(audio.weapon_swing.clone())),
            (SoundCue::Heal, asset_server.load(audio.heal.clone())),
            (SoundCue::Flame, asset_server.load(audio.flame.clone())),
            (SoundCue::Hit, asset_server.load(audio.hit.clone())),
            (SoundCue::Death, asset_server.load(audio.death.clone())),
        ]);
        for species in [Species::Bamboo, Species::Spirit, Species::Raccoon, Species::Squid] {
            let path = settings.monster(species).attack_sound;
            cues.insert(SoundCue::EnemyAttack(species), asset_server.load(path));
        }

        Self {
            cues,
            music: asset_server.load(audio.music.clone()),
        }
    }
}

fn load_sounds(mut commands: Commands, settings: Res<GameSettings>, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundLibrary::load(&settings, &asset_server));
}

fn start_music(audio: Res<Audio>, library: Res<SoundLibrary>, settings: Res<GameSettings>) {
    audio
        .play(library.music.clone())
        .looped()
        .with_volume(settings.audio.music_volume);
}

/// Play every requested cue once.
fn play_sound_cues(
    mut cues: EventReader<PlaySoundEvent>,
    audio: Res<Audio>,
    library: Option<Res<SoundLibrary>>,
    settings: Res<GameSettings>,
) {
    let Some(library) = library else {
        cues.clear();
        return;
    };

    for PlaySoundEvent(cue) in cues.read() {
        let Some(handle) = library.cues.get(cue) else {
            continue;
        };
        audio
            .play(handle.clone())
            .with_volume(settings.audio.effects_volume);
    }
}
