//! Procedural sound cues
//!
//! Every cue is a short list of beeps, each with a start delay. The whole
//! list is handed to a `ToneSink` at once, which schedules the beeps on its
//! own clock (the Web Audio context on the web). Failures are swallowed:
//! missing audio never affects play.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom edge
    WallBounce,
    /// Point scored
    Score,
    /// Match over
    MatchOver,
}

impl SoundEffect {
    /// Cue for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::WallBounce => SoundEffect::WallBounce,
            GameEvent::PaddleHit { .. } => SoundEffect::PaddleHit,
            GameEvent::PointScored { .. } => SoundEffect::Score,
            GameEvent::MatchOver { .. } => SoundEffect::MatchOver,
        }
    }

    /// Beeps making up this cue
    pub fn cue(&self) -> &'static [ScheduledTone] {
        match self {
            SoundEffect::PaddleHit => PADDLE_HIT,
            SoundEffect::WallBounce => WALL_BOUNCE,
            SoundEffect::Score => SCORE,
            SoundEffect::MatchOver => MATCH_OVER,
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub freq: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    /// Gain, 0-1
    pub volume: f32,
}

impl Tone {
    const fn new(freq: f32, duration: f32, waveform: Waveform, volume: f32) -> Self {
        Self {
            freq,
            duration,
            waveform,
            volume,
        }
    }
}

/// A beep and its offset from the start of the cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    /// Seconds after the cue starts
    pub delay: f64,
    pub tone: Tone,
}

const fn at(delay: f64, tone: Tone) -> ScheduledTone {
    ScheduledTone { delay, tone }
}

/// Higher pitch click
const PADDLE_HIT: &[ScheduledTone] = &[at(0.0, Tone::new(600.0, 0.06, Waveform::Square, 0.12))];

/// Soft thud
const WALL_BOUNCE: &[ScheduledTone] = &[at(0.0, Tone::new(300.0, 0.05, Waveform::Triangle, 0.08))];

/// Rising three-note arpeggio
const SCORE: &[ScheduledTone] = &[
    at(0.0, Tone::new(523.0, 0.12, Waveform::Sine, 0.15)),
    at(0.1, Tone::new(659.0, 0.12, Waveform::Sine, 0.15)),
    at(0.2, Tone::new(784.0, 0.18, Waveform::Sine, 0.18)),
];

/// Four-note fanfare
const MATCH_OVER: &[ScheduledTone] = &[
    at(0.0, Tone::new(523.0, 0.15, Waveform::Sine, 0.2)),
    at(0.12, Tone::new(659.0, 0.15, Waveform::Sine, 0.2)),
    at(0.24, Tone::new(784.0, 0.15, Waveform::Sine, 0.2)),
    at(0.36, Tone::new(1047.0, 0.3, Waveform::Sine, 0.25)),
];

/// Something that can play a tone `delay` seconds from now
pub trait ToneSink {
    /// None if the tone could not be played
    fn play_tone(&mut self, delay: f64, tone: &Tone) -> Option<()>;

    /// Unlock output after a user gesture (browsers start suspended)
    fn resume(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager<S: ToneSink> {
    sink: Option<S>,
}

impl<S: ToneSink> AudioManager<S> {
    /// Wrap a sink. `None` means audio is unavailable; every cue is a no-op.
    pub fn new(sink: Option<S>) -> Self {
        if sink.is_none() {
            log::warn!("No audio output - audio disabled");
        }
        Self { sink }
    }

    /// Resume output (call from a user gesture)
    pub fn resume(&mut self) {
        if let Some(sink) = &mut self.sink {
            sink.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let Some(sink) = &mut self.sink else { return };

        for scheduled in effect.cue() {
            if sink.play_tone(scheduled.delay, &scheduled.tone).is_none() {
                log::debug!("Dropped {:?} tone at {:.0} Hz", effect, scheduled.tone.freq);
            }
        }
    }

    /// Play the cue for every event, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}

/// Logs tones instead of playing them (native builds)
#[derive(Debug, Default)]
pub struct LogSink;

impl ToneSink for LogSink {
    fn play_tone(&mut self, delay: f64, tone: &Tone) -> Option<()> {
        log::trace!(
            "beep {:.0} Hz {:?} for {:.2}s (+{:.2}s)",
            tone.freq,
            tone.waveform,
            tone.duration,
            delay
        );
        Some(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{Tone, ToneSink, Waveform};

    /// Web Audio output. The context is created lazily on first use, since
    /// browsers only allow it after a user gesture.
    #[derive(Default)]
    pub struct WebAudioSink {
        ctx: Option<AudioContext>,
        failed: bool,
    }

    impl WebAudioSink {
        pub fn new() -> Self {
            Self::default()
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() && !self.failed {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        self.failed = true;
                    }
                }
            }
            self.ctx.as_ref()
        }
    }

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    impl ToneSink for WebAudioSink {
        fn play_tone(&mut self, delay: f64, tone: &Tone) -> Option<()> {
            let ctx = self.context()?;

            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(oscillator_type(tone.waveform));
            osc.frequency().set_value(tone.freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time() + delay;
            let end = t + tone.duration as f64;
            gain.gain().set_value_at_time(tone.volume, t).ok()?;
            gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok()?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(end).ok()?;
            Some(())
        }

        fn resume(&mut self) {
            if let Some(ctx) = self.context() {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Score, Side};

    /// Records every tone it is asked to play
    #[derive(Default)]
    struct RecordingSink {
        played: Vec<(f64, Tone)>,
    }

    impl ToneSink for RecordingSink {
        fn play_tone(&mut self, delay: f64, tone: &Tone) -> Option<()> {
            self.played.push((delay, *tone));
            Some(())
        }
    }

    /// Always fails
    struct BrokenSink;

    impl ToneSink for BrokenSink {
        fn play_tone(&mut self, _delay: f64, _tone: &Tone) -> Option<()> {
            None
        }
    }

    #[test]
    fn test_score_is_ascending_arpeggio() {
        let cue = SoundEffect::Score.cue();
        assert_eq!(cue.len(), 3);
        assert!(cue.windows(2).all(|w| w[0].tone.freq < w[1].tone.freq));
        assert!(cue.windows(2).all(|w| w[0].delay < w[1].delay));
    }

    #[test]
    fn test_match_over_fanfare() {
        let cue = SoundEffect::MatchOver.cue();
        assert_eq!(cue.len(), 4);
        assert_eq!(cue[3].tone.freq, 1047.0);
        assert_eq!(cue[3].delay, 0.36);
    }

    #[test]
    fn test_play_schedules_whole_cue() {
        let mut audio = AudioManager::new(Some(RecordingSink::default()));
        audio.play(SoundEffect::MatchOver);
        let sink = audio.sink.as_ref().unwrap();
        let delays: Vec<f64> = sink.played.iter().map(|(d, _)| *d).collect();
        assert_eq!(delays, vec![0.0, 0.12, 0.24, 0.36]);
    }

    #[test]
    fn test_cue_volumes_passed_through() {
        let mut audio = AudioManager::new(Some(RecordingSink::default()));
        audio.play(SoundEffect::PaddleHit);
        let (delay, tone) = audio.sink.as_ref().unwrap().played[0];
        assert_eq!(delay, 0.0);
        assert_eq!(tone.waveform, Waveform::Square);
        assert_eq!(tone.volume, 0.12);
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioManager::new(Some(RecordingSink::default()));
        let score = Score { left: 7, right: 2 };
        audio.play_events(&[
            GameEvent::WallBounce,
            GameEvent::PointScored {
                side: Side::Left,
                score,
            },
            GameEvent::MatchOver {
                winner: Side::Left,
                score,
                new_high_score: false,
            },
        ]);
        assert_eq!(audio.sink.as_ref().unwrap().played.len(), 1 + 3 + 4);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut audio = AudioManager::new(Some(BrokenSink));
        audio.play(SoundEffect::Score);

        let mut silent: AudioManager<LogSink> = AudioManager::new(None);
        silent.play(SoundEffect::Score);
        assert!(silent.sink.is_none());
    }
}
