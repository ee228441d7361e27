//! Sound settings and the tone plan for each game cue.
//!
//! Audio output itself is left to a [`SoundSink`]; this module only decides
//! which tones a cue plays in each style, and plays nothing while muted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selectable sound theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundStyle {
    /// Square-wave clicks and a rising sawtooth fanfare.
    #[default]
    Arcade,
    /// High ticks and a sawtooth chord stack.
    Edm,
    /// Chiptune beeps.
    Retro,
}

impl SoundStyle {
    /// All styles in menu order.
    pub const ALL: [SoundStyle; 3] = [SoundStyle::Arcade, SoundStyle::Edm, SoundStyle::Retro];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SoundStyle::Arcade => "Arcade",
            SoundStyle::Edm => "EDM",
            SoundStyle::Retro => "Retro",
        }
    }

    /// The next style in menu order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            SoundStyle::Arcade => SoundStyle::Edm,
            SoundStyle::Edm => SoundStyle::Retro,
            SoundStyle::Retro => SoundStyle::Arcade,
        }
    }
}

impl fmt::Display for SoundStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized style name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sound style: {} (expected arcade, edm or retro)", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for SoundStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arcade" => Ok(SoundStyle::Arcade),
            "edm" => Ok(SoundStyle::Edm),
            "retro" => Ok(SoundStyle::Retro),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

/// Game moments that make a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Reels start spinning.
    SpinStart,
    /// One reel stops.
    ReelStop,
    /// A spin paid out.
    Win,
    /// Credits were deposited.
    Coin,
}

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Sine wave.
    Sine,
    /// Square wave.
    Square,
    /// Triangle wave.
    Triangle,
    /// Sawtooth wave.
    Sawtooth,
}

/// One scheduled tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz.
    pub frequency_hz: f32,
    /// Offset from the cue in milliseconds.
    pub start_ms: u32,
    /// Length in milliseconds.
    pub duration_ms: u32,
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Peak gain (0.0-1.0).
    pub gain: f32,
}

const fn tone(
    frequency_hz: f32,
    start_ms: u32,
    duration_ms: u32,
    waveform: Waveform,
    gain: f32,
) -> Tone {
    Tone {
        frequency_hz,
        start_ms,
        duration_ms,
        waveform,
        gain,
    }
}

/// Spin ticks repeat every 70 ms, 19 times.
const SPIN_TICKS: u32 = 19;
const SPIN_TICK_MS: u32 = 70;

/// Tones for a cue in a style, ignoring mute.
#[must_use]
pub fn cue_tones(style: SoundStyle, cue: Cue) -> Vec<Tone> {
    use Waveform::{Sawtooth, Sine, Square, Triangle};

    match (cue, style) {
        (Cue::SpinStart, style) => {
            let (freq, dur, gain) = match style {
                SoundStyle::Edm => (4000.0, 20, 0.015),
                SoundStyle::Retro => (320.0, 50, 0.02),
                SoundStyle::Arcade => (230.0, 40, 0.02),
            };
            (0..SPIN_TICKS)
                .map(|i| tone(freq, i * SPIN_TICK_MS, dur, Square, gain))
                .collect()
        }
        (Cue::ReelStop, SoundStyle::Edm) => vec![tone(180.0, 0, 30, Sine, 0.04)],
        (Cue::ReelStop, SoundStyle::Retro) => vec![tone(500.0, 0, 50, Square, 0.025)],
        (Cue::ReelStop, SoundStyle::Arcade) => vec![tone(300.0, 0, 60, Square, 0.025)],
        (Cue::Win, SoundStyle::Edm) => [440.0, 554.37, 659.25, 880.0]
            .iter()
            .zip(0u32..)
            .map(|(&f, i)| tone(f, i * 100, 280, Sawtooth, 0.08))
            .collect(),
        (Cue::Win, SoundStyle::Retro) => [523.25, 659.25, 784.0]
            .iter()
            .map(|&f| tone(f, 0, 120, Square, 0.05))
            .collect(),
        (Cue::Win, SoundStyle::Arcade) => [523.25, 659.25, 783.99, 1046.5]
            .iter()
            .zip(0u32..)
            .map(|(&f, i)| tone(f, i * 120, 300, Sawtooth, 0.05))
            .collect(),
        (Cue::Coin, _) => [880.0, 1320.0, 1760.0]
            .iter()
            .zip(0u32..)
            .map(|(&f, i)| tone(f, i * 60, 300, Triangle, 0.06))
            .collect(),
    }
}

/// Persisted sound preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundSettings {
    /// Whether all cues are silenced.
    pub mute: bool,
    /// Active style.
    pub style: SoundStyle,
}

impl SoundSettings {
    /// Tones to play for a cue; empty when muted.
    #[must_use]
    pub fn tones(&self, cue: Cue) -> Vec<Tone> {
        if self.mute {
            Vec::new()
        } else {
            cue_tones(self.style, cue)
        }
    }
}

/// Something that can play tones.
pub trait SoundSink {
    /// Play a cue's tones. Called with an empty slice when muted.
    fn play(&mut self, cue: Cue, tones: &[Tone]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse_and_serde() {
        assert_eq!("EDM".parse::<SoundStyle>().unwrap(), SoundStyle::Edm);
        assert!("polka".parse::<SoundStyle>().is_err());
        assert_eq!(serde_json::to_string(&SoundStyle::Retro).unwrap(), "\"retro\"");
        let style: SoundStyle = serde_json::from_str("\"arcade\"").unwrap();
        assert_eq!(style, SoundStyle::Arcade);
    }

    #[test]
    fn test_style_cycle() {
        let mut style = SoundStyle::default();
        for _ in 0..SoundStyle::ALL.len() {
            style = style.next();
        }
        assert_eq!(style, SoundStyle::Arcade);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = SoundSettings {
            mute: true,
            style: SoundStyle::Edm,
        };
        assert!(settings.tones(Cue::Win).is_empty());
    }

    #[test]
    fn test_cue_plans() {
        assert_eq!(cue_tones(SoundStyle::Arcade, Cue::SpinStart).len(), 19);
        assert_eq!(cue_tones(SoundStyle::Edm, Cue::Win).len(), 4);
        assert_eq!(cue_tones(SoundStyle::Retro, Cue::Win).len(), 3);
        let coin = cue_tones(SoundStyle::Retro, Cue::Coin);
        assert_eq!(coin[2].start_ms, 120);
    }
}
