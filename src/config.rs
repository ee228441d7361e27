//! Game configuration.
//!
//! Read from `config.toml` in the data directory when present; every field
//! has a default, so a partial file only overrides what it names.

use crate::error::ConfigError;
use crate::wallet::{BET_OPTIONS, DEFAULT_BALANCE, DEFAULT_BET};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Tunable game settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Balance for a fresh profile.
    pub starting_balance: u64,
    /// Bet for a fresh profile; must be on `bet_options`.
    pub default_bet: u64,
    /// The bet menu.
    pub bet_options: Vec<u64>,
    /// Data directory override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Reel timing.
    pub timing: ReelTiming,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_BALANCE,
            default_bet: DEFAULT_BET,
            bet_options: BET_OPTIONS.to_vec(),
            data_dir: None,
            timing: ReelTiming::default(),
        }
    }
}

/// Reel animation and auto-spin timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelTiming {
    /// Interval between cosmetic re-draws while a reel spins.
    pub flicker_ms: u64,
    /// Delay from spin start until each reel stops.
    pub stop_delays_ms: [u64; 3],
    /// Pause between a settled spin and the next auto-spin.
    pub auto_spin_delay_ms: u64,
}

impl Default for ReelTiming {
    fn default() -> Self {
        Self {
            flicker_ms: 60,
            stop_delays_ms: [900, 1500, 2100],
            auto_spin_delay_ms: 600,
        }
    }
}

impl ReelTiming {
    /// Flicker interval.
    #[must_use]
    pub const fn flicker(&self) -> Duration {
        Duration::from_millis(self.flicker_ms)
    }

    /// Stop delay for a reel.
    #[must_use]
    pub const fn stop_delay(&self, reel: usize) -> Duration {
        Duration::from_millis(self.stop_delays_ms[reel])
    }

    /// Delay until the last reel stops.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        let max = self.stop_delays_ms.iter().copied().max().unwrap_or(0);
        Duration::from_millis(max)
    }

    /// Auto-spin pause.
    #[must_use]
    pub const fn auto_spin_delay(&self) -> Duration {
        Duration::from_millis(self.auto_spin_delay_ms)
    }
}

impl GameConfig {
    /// Load `config.toml` from `dir`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write the config as `config.toml` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, content).map_err(|source| ConfigError::Io { path, source })
    }

    /// Check cross-field rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the bet menu is empty or has a zero
    /// entry, or the default bet is not on it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bet_options.is_empty() {
            return Err(ConfigError::Invalid("bet_options must not be empty".to_string()));
        }
        if self.bet_options.contains(&0) {
            return Err(ConfigError::Invalid("bet_options must be positive".to_string()));
        }
        if !self.bet_options.contains(&self.default_bet) {
            return Err(ConfigError::Invalid(format!(
                "default_bet {} is not in bet_options",
                self.default_bet
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(GameConfig::load(dir.path()).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "starting_balance = 50\n\n[timing]\nflicker_ms = 30\n",
        )
        .unwrap();
        let config = GameConfig::load(dir.path()).unwrap();
        assert_eq!(config.starting_balance, 50);
        assert_eq!(config.timing.flicker_ms, 30);
        assert_eq!(config.timing.stop_delays_ms, [900, 1500, 2100]);
        assert_eq!(config.default_bet, 10);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            bet_options: vec![2, 4],
            default_bet: 4,
            ..GameConfig::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(GameConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_default_bet_must_be_on_menu() {
        let config = GameConfig {
            bet_options: vec![1, 2],
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_settle_delay() {
        assert_eq!(ReelTiming::default().settle_delay(), Duration::from_millis(2100));
    }
}
