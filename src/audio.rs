//! Audio cues
//!
//! The simulation emits [`GameEvent`]s; this module maps them to procedurally
//! described sounds and hands them to whatever [`AudioSink`] the frontend
//! provides. No sample files are needed.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallHit,
    /// Point scored
    Score,
    /// Booster collected
    Booster,
    /// Extra balls spawned
    MultiBall,
    /// Round won by the local player
    Win,
    /// Round lost by the local player
    Lose,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::PaddleHit,
        SoundEffect::WallHit,
        SoundEffect::Score,
        SoundEffect::Booster,
        SoundEffect::MultiBall,
        SoundEffect::Win,
        SoundEffect::Lose,
    ];

    pub fn from_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::PaddleHit { .. } => SoundEffect::PaddleHit,
            GameEvent::Score { .. } => SoundEffect::Score,
            GameEvent::Booster { .. } => SoundEffect::Booster,
            GameEvent::MultiBall => SoundEffect::MultiBall,
            GameEvent::Win => SoundEffect::Win,
            GameEvent::Lose => SoundEffect::Lose,
        }
    }

    /// Recipe for synthesizing this effect
    pub fn tone(self) -> Tone {
        match self {
            // Solid thump
            SoundEffect::PaddleHit => Tone::sweep(Waveform::Sine, 150.0, 60.0, 0.15, 0.6),
            // Higher ping
            SoundEffect::WallHit => Tone::steady(Waveform::Sine, 400.0, 0.1, 0.3),
            SoundEffect::Score => Tone::sweep(Waveform::Triangle, 880.0, 440.0, 0.3, 0.5),
            SoundEffect::Booster => Tone::sweep(Waveform::Sine, 600.0, 1200.0, 0.2, 0.4),
            SoundEffect::MultiBall => Tone::sweep(Waveform::Square, 300.0, 900.0, 0.25, 0.25),
            SoundEffect::Win => Tone::sweep(Waveform::Triangle, 523.0, 1046.0, 0.6, 0.5),
            SoundEffect::Lose => Tone::sweep(Waveform::Sawtooth, 300.0, 80.0, 0.6, 0.35),
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single oscillator with a frequency sweep and exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl Tone {
    const fn sweep(
        waveform: Waveform,
        start_hz: f32,
        end_hz: f32,
        duration: f32,
        gain: f32,
    ) -> Self {
        Self {
            waveform,
            start_hz,
            end_hz,
            duration,
            gain,
        }
    }

    const fn steady(waveform: Waveform, hz: f32, duration: f32, gain: f32) -> Self {
        Self::sweep(waveform, hz, hz, duration, gain)
    }
}

/// Backend that actually produces sound
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32);
}

/// Sink for headless runs: logs each cue
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        log::debug!(
            "sfx {effect:?}: {:?} {:.0}->{:.0} Hz, {:.2}s at {volume:.2}",
            tone.waveform,
            tone.start_hz,
            tone.end_hz,
            tone.duration
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volumes from user settings
    pub fn with_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let tone = effect.tone();
        self.sink.play(effect, tone, vol * tone.gain);
    }

    /// Play one cue per event, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::from_event(event));
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BoosterKind, Side};

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32)>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _tone: Tone, volume: f32) {
            self.played.push((effect, volume));
        }
    }

    #[test]
    fn test_events_map_one_to_one() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.play_events(&[
            GameEvent::WallHit,
            GameEvent::PaddleHit { side: Side::Left },
            GameEvent::Booster {
                kind: BoosterKind::MultiBall,
            },
            GameEvent::MultiBall,
            GameEvent::Score { side: Side::Right },
            GameEvent::Lose,
        ]);
        let played: Vec<_> = audio.sink().played.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            played,
            vec![
                SoundEffect::WallHit,
                SoundEffect::PaddleHit,
                SoundEffect::Booster,
                SoundEffect::MultiBall,
                SoundEffect::Score,
                SoundEffect::Lose,
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Win);
        assert!(audio.sink().played.is_empty());
    }

    #[test]
    fn test_volume_scales_tone_gain() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        let mut audio = AudioManager::with_settings(Recorder::default(), &settings);
        audio.play(SoundEffect::PaddleHit);
        let (_, volume) = audio.sink().played[0];
        assert!((volume - 0.25 * 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_every_tone_is_audible() {
        for effect in SoundEffect::ALL {
            let tone = effect.tone();
            assert!(tone.duration > 0.0);
            assert!(tone.gain > 0.0 && tone.gain <= 1.0);
            assert!(tone.start_hz > 0.0 && tone.end_hz > 0.0);
        }
    }
}
