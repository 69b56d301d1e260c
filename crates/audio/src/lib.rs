//! Sound cues for game events.
//!
//! This crate does not synthesize audio. It describes each cue as a short
//! sequence of [`Tone`]s (frequency, duration, waveform, start delay) and hands
//! them to a [`ToneSink`]. [`SoundBoard`] applies the sound-enabled setting:
//! when disabled nothing reaches the sink.
//!
//! ```
//! use blockfall_audio::{SoundBoard, SoundCue, ToneSink, Tone};
//!
//! #[derive(Default)]
//! struct Collect(Vec<Tone>);
//! impl ToneSink for Collect {
//!     fn play(&mut self, tone: Tone) {
//!         self.0.push(tone);
//!     }
//! }
//!
//! let mut board = SoundBoard::new(Collect::default(), true);
//! board.play(SoundCue::LineClear { lines: 2 });
//! assert_eq!(board.sink().0[0].frequency_hz, 723);
//!
//! board.set_enabled(false);
//! board.play(SoundCue::Move);
//! assert_eq!(board.sink().0.len(), 1);
//! ```

use arrayvec::ArrayVec;

pub use blockfall_core as core;

use blockfall_core::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
}

impl Waveform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }
}

/// One tone request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    pub waveform: Waveform,
    /// Offset from the moment the cue is played.
    pub delay_ms: u32,
}

impl Tone {
    const fn sine(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            waveform: Waveform::Sine,
            delay_ms: 0,
        }
    }

    const fn with_waveform(self, waveform: Waveform) -> Self {
        Self { waveform, ..self }
    }

    const fn delayed(self, delay_ms: u32) -> Self {
        Self { delay_ms, ..self }
    }
}

/// Tones making up one cue (the win arpeggio is the longest at three).
pub type Tones = ArrayVec<Tone, 3>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Lock,
    /// Pitch rises with the number of lines.
    LineClear { lines: u32 },
    Hold,
    /// Played for both pause and resume.
    Pause,
    ThemeToggle,
    HardDrop,
    /// Descending sawtooth.
    GameOver,
    /// Ascending three-note arpeggio.
    Win,
}

impl SoundCue {
    pub fn tones(self) -> Tones {
        let mut tones = Tones::new();
        match self {
            SoundCue::Move => tones.push(Tone::sine(200, 50)),
            SoundCue::Rotate => tones.push(Tone::sine(300, 100)),
            SoundCue::Lock => tones.push(Tone::sine(150, 200)),
            SoundCue::LineClear { lines } => tones.push(
                Tone::sine(523 + lines * 100, 300).with_waveform(Waveform::Square),
            ),
            SoundCue::Hold => tones.push(Tone::sine(400, 100)),
            SoundCue::Pause => tones.push(Tone::sine(440, 100)),
            SoundCue::ThemeToggle => tones.push(Tone::sine(330, 100)),
            SoundCue::HardDrop => tones.push(Tone::sine(100, 300)),
            SoundCue::GameOver => {
                tones.push(Tone::sine(200, 500).with_waveform(Waveform::Sawtooth))
            }
            SoundCue::Win => {
                tones.push(Tone::sine(523, 200));
                tones.push(Tone::sine(659, 200).delayed(150));
                tones.push(Tone::sine(784, 300).delayed(300));
            }
        }
        tones
    }

    /// The cue a game event should sound, if any.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Moved => Some(SoundCue::Move),
            GameEvent::Rotated => Some(SoundCue::Rotate),
            GameEvent::Locked => Some(SoundCue::Lock),
            GameEvent::LinesCleared { .. } => Some(SoundCue::LineClear {
                lines: event.lines_cleared(),
            }),
            GameEvent::Held => Some(SoundCue::Hold),
            GameEvent::Paused | GameEvent::Resumed => Some(SoundCue::Pause),
            GameEvent::HardDropped { .. } => Some(SoundCue::HardDrop),
            GameEvent::GameOver { won: false } => Some(SoundCue::GameOver),
            GameEvent::GameOver { won: true } => Some(SoundCue::Win),
            GameEvent::Started
            | GameEvent::SoftDropped
            | GameEvent::LevelChanged { .. }
            | GameEvent::MenuOpened => None,
        }
    }
}

/// Output device for tones.
pub trait ToneSink {
    fn play(&mut self, tone: Tone);
}

/// Sink that records each tone at debug level instead of producing sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ToneSink for LogSink {
    fn play(&mut self, tone: Tone) {
        log::debug!(
            "tone {}Hz {}ms {} +{}ms",
            tone.frequency_hz,
            tone.duration_ms,
            tone.waveform.as_str(),
            tone.delay_ms
        );
    }
}

/// Gate between cues and a sink.
#[derive(Debug)]
pub struct SoundBoard<S> {
    sink: S,
    enabled: bool,
}

impl<S: ToneSink> SoundBoard<S> {
    pub fn new(sink: S, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Send a cue to the sink. Returns false when muted.
    pub fn play(&mut self, cue: SoundCue) -> bool {
        if !self.enabled {
            return false;
        }
        for tone in cue.tones() {
            self.sink.play(tone);
        }
        true
    }

    /// Play whatever cue belongs to `event`.
    pub fn handle_event(&mut self, event: &GameEvent) -> bool {
        match SoundCue::for_event(event) {
            Some(cue) => self.play(cue),
            None => false,
        }
    }
}
