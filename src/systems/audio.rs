//! Audio system for the Munch Man game.
//!
//! Gameplay systems only emit [`AudioEvent`]s. The audio system resolves them into concrete sounds
//! and hands those to whatever [`AudioSink`] the host installed; playback itself is fire-and-forget.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::ResMut,
};
use strum_macros::AsRefStr;
use tracing::{debug, trace};

/// The game's sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Sound {
    Ball1,
    Ball2,
    Death,
    GhostReturn,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a specific sound effect
    PlaySound(Sound),
    /// Play the next of the two alternating pickup sounds
    Pickup,
}

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
    /// Current sound index for alternating the pickup sounds
    pub sound_index: usize,
}

/// Something that can play a named sound.
pub trait AudioSink: Send + Sync {
    fn play(&mut self, sound: Sound);
}

/// Default sink for headless runs: every sound becomes a log line.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl AudioSink for LoggingSink {
    fn play(&mut self, sound: Sound) {
        debug!(?sound, "Sound played");
    }
}

#[derive(Resource)]
pub struct AudioResource(pub Box<dyn AudioSink>);

impl Default for AudioResource {
    fn default() -> Self {
        Self(Box::new(LoggingSink))
    }
}

const PICKUP_SOUNDS: [Sound; 2] = [Sound::Ball1, Sound::Ball2];

/// System that processes audio events and plays sounds
pub fn audio_system(mut audio: ResMut<AudioResource>, mut state: ResMut<AudioState>, mut events: EventReader<AudioEvent>) {
    for event in events.read() {
        let sound = match event {
            AudioEvent::Pickup => {
                let sound = PICKUP_SOUNDS[state.sound_index];
                state.sound_index = (state.sound_index + 1) % PICKUP_SOUNDS.len();
                sound
            }
            AudioEvent::PlaySound(sound) => *sound,
        };

        if state.muted {
            trace!(?sound, "Skipping sound, audio muted");
            continue;
        }
        audio.0.play(sound);
    }
}
