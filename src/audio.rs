//! Sound cues and volume mixing
//!
//! The simulation emits cue keys; playback is the frontend's problem. The
//! mixer carries the volume and mute logic so every frontend applies it the
//! same way. Cues are fire-and-forget with no acknowledgment, and nothing
//! here touches simulation state.

use serde::{Deserialize, Serialize};

/// The fixed cue set the simulation can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player fired
    Shoot,
    /// Bullet impact or player contact
    Hit,
    /// Enemy destroyed
    Explosion,
    /// Power-up collected
    Powerup,
}

impl SoundCue {
    pub fn as_key(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Hit => "hit",
            SoundCue::Explosion => "explosion",
            SoundCue::Powerup => "powerup",
        }
    }
}

/// Plays cues at a given volume; implemented by the frontend.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that swallows every cue (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

/// Volume staging in front of a sink
pub struct Mixer<S> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> Mixer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward a cue unless it would be inaudible anyway.
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that records what reached it
    #[derive(Default)]
    struct Recorder {
        cues: Vec<(SoundCue, f32)>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            self.cues.push((cue, volume));
        }
    }

    #[test]
    fn mute_drops_cues_before_the_sink() {
        let mut mixer = Mixer::new(Recorder::default());
        mixer.set_muted(true);
        mixer.play(SoundCue::Explosion);
        assert!(mixer.sink.cues.is_empty());

        mixer.set_muted(false);
        mixer.play(SoundCue::Explosion);
        assert_eq!(mixer.sink.cues.len(), 1);
    }

    #[test]
    fn volumes_multiply_and_clamp() {
        let mut mixer = Mixer::new(Recorder::default());
        mixer.set_master_volume(0.5);
        mixer.set_sfx_volume(2.0); // clamps to 1.0
        mixer.play(SoundCue::Shoot);
        assert_eq!(mixer.sink.cues, vec![(SoundCue::Shoot, 0.5)]);
    }
}
