//! Presentation effects: sound cues, vibration and celebration.
//!
//! The game logic never triggers these. The front-end calls an [`Effects`]
//! implementation after each state change it wants to dress up.

use std::io::Write;
use tracing::{debug, instrument};

/// Oscillator shape of a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Waveform {
    /// Soft, pure tone.
    Sine,
    /// Brighter tone with odd harmonics.
    Triangle,
}

/// One synthesized note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz.
    pub frequency: f32,
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Length in seconds, including the fade-out.
    pub duration: f32,
    /// Start offset from the cue start, in seconds.
    pub delay: f32,
}

const fn tone(frequency: f32, waveform: Waveform, duration: f32, delay: f32) -> Tone {
    Tone {
        frequency,
        waveform,
        duration,
        delay,
    }
}

/// UI sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SoundCue {
    /// New game: rising whoosh.
    Start,
    /// A mark was placed: water droplet.
    Click,
    /// Human won: C major arpeggio ending on a high E.
    Win,
    /// Computer won: descending tones.
    Loss,
    /// Draw: neutral chord.
    Draw,
}

impl SoundCue {
    /// Notes that make up the cue.
    pub fn tones(self) -> &'static [Tone] {
        use Waveform::{Sine, Triangle};

        const START: [Tone; 2] = [tone(300.0, Sine, 0.2, 0.0), tone(600.0, Sine, 0.3, 0.1)];
        const CLICK: [Tone; 2] = [tone(800.0, Sine, 0.1, 0.0), tone(1200.0, Sine, 0.1, 0.05)];
        const WIN: [Tone; 5] = [
            tone(523.25, Triangle, 0.3, 0.0),
            tone(659.25, Triangle, 0.3, 0.1),
            tone(783.99, Triangle, 0.3, 0.2),
            tone(1046.50, Triangle, 0.3, 0.3),
            tone(1318.51, Sine, 0.6, 0.4),
        ];
        const LOSS: [Tone; 3] = [
            tone(440.0, Triangle, 0.3, 0.0),
            tone(415.30, Triangle, 0.3, 0.2),
            tone(392.00, Triangle, 0.5, 0.4),
        ];
        const DRAW: [Tone; 2] = [tone(440.0, Sine, 0.3, 0.0), tone(554.37, Sine, 0.3, 0.0)];

        match self {
            SoundCue::Start => &START,
            SoundCue::Click => &CLICK,
            SoundCue::Win => &WIN,
            SoundCue::Loss => &LOSS,
            SoundCue::Draw => &DRAW,
        }
    }

    /// Time until the last note has faded, in seconds.
    pub fn length(self) -> f32 {
        self.tones()
            .iter()
            .map(|t| t.delay + t.duration)
            .fold(0.0, f32::max)
    }
}

/// Vibration patterns, in alternating on/off milliseconds.
pub mod haptics {
    /// Human places a mark.
    pub const CLICK: &[u32] = &[20];
    /// Human won.
    pub const WIN: &[u32] = &[100, 50, 100, 50, 200];
    /// Computer won.
    pub const LOSS: &[u32] = &[400];
    /// Draw.
    pub const DRAW: &[u32] = &[50, 50];
}

/// Side-effect sink for sound, vibration and celebration.
pub trait Effects: Send {
    /// Plays a sound cue.
    fn play(&mut self, cue: SoundCue);

    /// Vibrates with an on/off pattern in milliseconds.
    fn vibrate(&mut self, pattern: &[u32]);

    /// Celebrates a human win.
    fn celebrate(&mut self);
}

/// Effects that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl Effects for NoEffects {
    fn play(&mut self, _cue: SoundCue) {}

    fn vibrate(&mut self, _pattern: &[u32]) {}

    fn celebrate(&mut self) {}
}

/// Terminal rendition of the effects.
///
/// Sounds ring the terminal bell and the celebration rings it three times.
/// Vibration has no terminal equivalent and is only logged.
pub struct TerminalEffects<W: Write + Send> {
    out: W,
    sound_enabled: bool,
    haptics_enabled: bool,
}

impl<W: Write + Send> TerminalEffects<W> {
    /// Creates terminal effects writing to `out`.
    pub fn new(out: W, sound_enabled: bool, haptics_enabled: bool) -> Self {
        Self {
            out,
            sound_enabled,
            haptics_enabled,
        }
    }

    /// Consumes the effects and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Confetti banner the result screen shows on a win.
pub const CONFETTI: &str = "✿ ❀ ♥ ✿ ❀ ♥ ✿ ❀ ♥ ✿ ❀ ♥ ✿";

impl<W: Write + Send> Effects for TerminalEffects<W> {
    #[instrument(skip(self))]
    fn play(&mut self, cue: SoundCue) {
        if !self.sound_enabled {
            return;
        }
        debug!(%cue, notes = cue.tones().len(), "Playing sound cue");
        // A failed bell is not worth interrupting the game for.
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }

    #[instrument(skip(self))]
    fn vibrate(&mut self, pattern: &[u32]) {
        if !self.haptics_enabled {
            return;
        }
        debug!(?pattern, "Vibration requested");
    }

    #[instrument(skip(self))]
    fn celebrate(&mut self) {
        if !self.sound_enabled {
            return;
        }
        debug!("Celebration fanfare");
        let _ = self.out.write_all(b"\x07\x07\x07").and_then(|_| self.out.flush());
    }
}
