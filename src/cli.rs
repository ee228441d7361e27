//! CLI command implementations for Lucky Frogs.

pub(crate) mod paytable;
pub(crate) mod play;
pub(crate) mod settings;
pub(crate) mod simulate;
pub(crate) mod spin;
pub(crate) mod symbols;

mod output;

use clap::ValueEnum;
use lucky_frogs::SlotMachine;
use lucky_frogs::config::GameConfig;
use lucky_frogs::error::{ActionError, ConfigError, DrawError, SpinError, StoreError};
use lucky_frogs::sound::SoundStyle;
use lucky_frogs::store::{FileStore, default_data_dir};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Output format for the `spin` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SpinFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Sound style argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SoundArg {
    /// Square-wave clicks.
    Arcade,
    /// Sawtooth chord stacks.
    Edm,
    /// Chiptune beeps.
    Retro,
}

impl From<SoundArg> for SoundStyle {
    fn from(arg: SoundArg) -> Self {
        match arg {
            SoundArg::Arcade => SoundStyle::Arcade,
            SoundArg::Edm => SoundStyle::Edm,
            SoundArg::Retro => SoundStyle::Retro,
        }
    }
}

/// The machine every command drives.
pub(crate) type Machine = SlotMachine<StdRng, FileStore>;

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SpinError> for CliError {
    fn from(e: SpinError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ActionError> for CliError {
    fn from(e: ActionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<DrawError> for CliError {
    fn from(e: DrawError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Directory holding `config.toml`: the `--data-dir` flag or `~/.lucky-frogs`.
///
/// # Errors
///
/// Returns an error if no flag is given and the home directory is unknown.
pub(crate) fn base_dir(flag: Option<&Path>) -> Result<PathBuf, CliError> {
    match flag {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(default_data_dir()?),
    }
}

/// Load the config and open the machine on its store.
///
/// The `--data-dir` flag wins over a `data_dir` set in the config.
///
/// # Errors
///
/// Returns an error if the config is invalid or the store cannot be opened.
pub(crate) fn open_machine(flag: Option<&Path>, seed: Option<u64>) -> Result<Machine, CliError> {
    let base = base_dir(flag)?;
    let config = GameConfig::load(&base)?;
    let store_dir = match (flag, &config.data_dir) {
        (None, Some(dir)) => dir.clone(),
        _ => base,
    };
    let store = FileStore::open(store_dir)?;
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(SlotMachine::load(config, rng, store))
}

/// Milliseconds since the Unix epoch, for new symbol ids.
pub(crate) fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
