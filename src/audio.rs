use amethyst::{
    assets::{AssetStorage, Loader},
    audio::{output::Output, AudioSink, Source, SourceHandle, WavFormat},
    ecs::{Read, World, WorldExt},
};
use log::warn;

use crate::config::audio::AudioConfig;

pub const PADDLE_HIT_SOUND: &str = "audio/paddle_hit.wav";
pub const SCORE_SOUND: &str = "audio/score.wav";
pub const SPEED_UP_SOUND: &str = "audio/speed_up.wav";
pub const SLOW_DOWN_SOUND: &str = "audio/slow_down.wav";
pub const BACKGROUND_MUSIC: &str = "audio/background_music.wav";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    PaddleHit,
    Score,
    SpeedUp,
    SlowDown,
}

pub struct Sounds {
    paddle_hit_sfx: SourceHandle,
    score_sfx: SourceHandle,
    speed_up_sfx: SourceHandle,
    slow_down_sfx: SourceHandle,
    volume: f32,
}

impl Sounds {
    fn handle(&self, cue: Cue) -> &SourceHandle {
        match cue {
            Cue::PaddleHit => &self.paddle_hit_sfx,
            Cue::Score => &self.score_sfx,
            Cue::SpeedUp => &self.speed_up_sfx,
            Cue::SlowDown => &self.slow_down_sfx,
        }
    }

    pub fn play(&self, cue: Cue, storage: &AssetStorage<Source>, output: &Output) {
        if let Some(sound) = storage.get(self.handle(cue)) {
            output.play_once(sound, self.volume);
        }
    }
}

/// Background track fed to the engine's dj system. Once stopped it stays silent.
pub struct Music {
    track: SourceHandle,
    playing: bool,
}

impl Music {
    pub fn new(track: SourceHandle) -> Self {
        Music { track, playing: true }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn next(&mut self) -> Option<SourceHandle> {
        if self.playing {
            Some(self.track.clone())
        } else {
            None
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }
}

/// Everything a system needs to fire a one-shot cue. Sounds and output are
/// optional so the game keeps running silently without an audio device.
pub type SoundOutput<'a> = (
    Read<'a, AssetStorage<Source>>,
    Option<Read<'a, Sounds>>,
    Option<Read<'a, Output>>,
);

pub fn play(audio: &SoundOutput, cue: Cue) {
    let (storage, sounds, output) = audio;
    if let (Some(sounds), Some(output)) = (sounds, output) {
        sounds.play(cue, storage, output);
    }
}

fn load_audio(loader: &Loader, world: &World, file: &str) -> SourceHandle {
    loader.load(file, WavFormat, (), &world.read_resource())
}

pub fn initialize_audio(world: &mut World) {
    let config = world
        .try_fetch::<AudioConfig>()
        .map(|config| (*config).clone())
        .unwrap_or_default();

    match world.try_fetch_mut::<AudioSink>() {
        Some(mut sink) => sink.set_volume(config.music_volume),
        None => warn!("no audio output available, playing silently"),
    }

    let (sounds, music) = {
        let loader = world.read_resource::<Loader>();

        let sounds = Sounds {
            paddle_hit_sfx: load_audio(&loader, world, PADDLE_HIT_SOUND),
            score_sfx: load_audio(&loader, world, SCORE_SOUND),
            speed_up_sfx: load_audio(&loader, world, SPEED_UP_SOUND),
            slow_down_sfx: load_audio(&loader, world, SLOW_DOWN_SOUND),
            volume: config.effect_volume,
        };
        let music = Music::new(load_audio(&loader, world, BACKGROUND_MUSIC));
        (sounds, music)
    };

    world.insert(sounds);
    world.insert(music);
}

/// Music over the shipped track, loaded on a single worker without a running game.
#[cfg(test)]
pub(crate) fn test_music() -> Music {
    use std::sync::Arc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .expect("thread pool");
    let loader = Loader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"), Arc::new(pool));
    let storage = AssetStorage::<Source>::default();
    Music::new(loader.load(BACKGROUND_MUSIC, WavFormat, (), &storage))
}
