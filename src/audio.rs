//! Event-to-sound-cue mapping
//!
//! The simulation reports what happened; this module decides what it
//! sounds like. Actual playback sits behind `AudioService` and is
//! fire-and-forget: a failed cue is simply never heard.

use crate::platform::{AssetError, AssetProvider, AudioService, SoundHandle, SoundId};
use crate::sim::GameEvent;

/// Sound handles resolved once at startup
pub struct SoundBank {
    fruit: SoundHandle,
    bomb: SoundHandle,
    lose: SoundHandle,
}

impl SoundBank {
    /// Resolve all sound handles. A missing sound aborts startup.
    pub fn load(assets: &mut dyn AssetProvider) -> Result<Self, AssetError> {
        Ok(Self {
            fruit: assets.load_sound(SoundId::FruitCaught)?,
            bomb: assets.load_sound(SoundId::BombHit)?,
            lose: assets.load_sound(SoundId::GameLost)?,
        })
    }

    /// Play the cues for one tick's events. Game over also pauses the
    /// background music; it resumes on restart.
    pub fn dispatch(&self, audio: &mut dyn AudioService, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::FruitCaught { .. } => audio.play(self.fruit),
                GameEvent::BombHit { .. } => audio.play(self.bomb),
                GameEvent::GameOver { .. } => {
                    audio.play(self.lose);
                    audio.pause_music();
                }
            }
        }
    }
}
