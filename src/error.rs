//! Error types for the slot machine core.

use crate::symbols::SymbolId;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to draw a symbol from the weighted pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The pool has no slots (every symbol was removed).
    EmptyPool,
    /// The drawn id is not in the table (the pool is stale).
    UnknownSymbol(SymbolId),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::EmptyPool => write!(f, "symbol pool is empty"),
            DrawError::UnknownSymbol(id) => write!(f, "drawn symbol {id} is not in the table"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Errors raised when editing the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// A symbol with this id already exists.
    DuplicateId(SymbolId),
    /// No symbol has this id.
    UnknownId(String),
    /// A symbol was given an empty display name.
    EmptyName,
    /// A symbol was configured with weight zero.
    ZeroWeight(SymbolId),
    /// The skull was made wild or given a positive payout.
    InvalidSkull,
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::DuplicateId(id) => write!(f, "duplicate symbol id: {id}"),
            SymbolError::UnknownId(id) => write!(f, "unknown symbol id: {id}"),
            SymbolError::EmptyName => write!(f, "symbol name must not be empty"),
            SymbolError::ZeroWeight(id) => write!(f, "symbol {id} has weight 0"),
            SymbolError::InvalidSkull => {
                write!(f, "the skull cannot be wild and its payouts must not be positive")
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// Errors raised by balance and bet operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    /// The requested bet is not on the bet menu.
    InvalidBet {
        /// The rejected amount.
        amount: u64,
    },
    /// The balance does not cover the bet.
    InsufficientBalance {
        /// Current balance.
        balance: u64,
        /// Bet that could not be covered.
        bet: u64,
    },
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::InvalidBet { amount } => write!(f, "bet {amount} is not on the bet menu"),
            WalletError::InsufficientBalance { balance, bet } => {
                write!(f, "insufficient balance: {balance} credits, bet is {bet}")
            }
        }
    }
}

impl std::error::Error for WalletError {}

/// Reasons a spin request is rejected.
///
/// A rejected spin never mutates the balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinError {
    /// Another spin is still in flight.
    InProgress,
    /// The balance does not cover the bet.
    InsufficientBalance {
        /// Current balance.
        balance: u64,
        /// Bet that could not be covered.
        bet: u64,
    },
    /// The symbol pool could not produce a draw.
    Draw(DrawError),
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinError::InProgress => write!(f, "a spin is already in progress"),
            SpinError::InsufficientBalance { .. } => {
                write!(f, "Insufficient balance - deposit more to play.")
            }
            SpinError::Draw(e) => write!(f, "cannot spin: {e}"),
        }
    }
}

impl std::error::Error for SpinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpinError::Draw(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DrawError> for SpinError {
    fn from(e: DrawError) -> Self {
        SpinError::Draw(e)
    }
}

/// Errors from user actions other than spinning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The action is locked while the reels are spinning.
    Busy,
    /// A wallet rule rejected the action.
    Wallet(WalletError),
    /// A symbol table rule rejected the action.
    Symbol(SymbolError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Busy => write!(f, "not available while the reels are spinning"),
            ActionError::Wallet(e) => write!(f, "{e}"),
            ActionError::Symbol(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<WalletError> for ActionError {
    fn from(e: WalletError) -> Self {
        ActionError::Wallet(e)
    }
}

impl From<SymbolError> for ActionError {
    fn from(e: SymbolError) -> Self {
        ActionError::Symbol(e)
    }
}

/// Errors from the key-value store.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing a key failed.
    Io {
        /// The key being accessed.
        key: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A value could not be encoded.
    Encode {
        /// The key being written.
        key: String,
        /// Encoder message.
        message: String,
    },
    /// No home directory to place the data directory in.
    NoHomeDir,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { key, source } => write!(f, "store I/O failed for {key}: {source}"),
            StoreError::Encode { key, message } => write!(f, "cannot encode {key}: {message}"),
            StoreError::NoHomeDir => write!(f, "cannot determine home directory"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from loading the game configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// The config parsed but breaks a rule.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::Parse { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
            ConfigError::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_error_wraps_draw_error() {
        let err = SpinError::from(DrawError::EmptyPool);
        assert_eq!(err, SpinError::Draw(DrawError::EmptyPool));
        assert!(err.to_string().contains("empty"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unknown_symbol_names_the_id() {
        let err = DrawError::UnknownSymbol(SymbolId::new("lotus"));
        assert_eq!(err.to_string(), "drawn symbol lotus is not in the table");
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = SpinError::InsufficientBalance {
            balance: 3,
            bet: 10,
        };
        assert!(err.to_string().starts_with("Insufficient balance"));
    }
}
