//! Session configuration read when a game starts.

use crate::types::GameMode;

pub const ENV_START_LEVEL: &str = "BLOCKFALL_START_LEVEL";
pub const ENV_MODE: &str = "BLOCKFALL_MODE";
pub const ENV_SOUND: &str = "BLOCKFALL_SOUND";

/// Highest start level offered by the menu.
pub const MAX_START_LEVEL: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Starting level, at least 1.
    pub start_level: u32,
    pub mode: GameMode,
    pub sound_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_level: 1,
            mode: GameMode::Classic,
            sound_enabled: true,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `BLOCKFALL_*` environment variables.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup(ENV_START_LEVEL).and_then(|v| v.trim().parse::<u32>().ok()) {
            config.start_level = level;
        }
        if let Some(mode) = lookup(ENV_MODE).and_then(|v| GameMode::from_str(&v)) {
            config.mode = mode;
        }
        if let Some(sound) = lookup(ENV_SOUND).and_then(|v| parse_bool(&v)) {
            config.sound_enabled = sound;
        }
        config.normalized()
    }

    /// Clamp the start level into `1..=MAX_START_LEVEL`.
    pub fn normalized(self) -> Self {
        Self {
            start_level: self.start_level.clamp(1, MAX_START_LEVEL),
            ..self
        }
    }

    pub fn with_start_level(self, start_level: u32) -> Self {
        Self { start_level, ..self }.normalized()
    }

    pub fn with_mode(self, mode: GameMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_sound(self, sound_enabled: bool) -> Self {
        Self {
            sound_enabled,
            ..self
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
