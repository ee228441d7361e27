//! Credit balance and bet size.
//!
//! The balance never goes negative: any delta that would take it below zero
//! leaves it at zero. Bets come from a fixed menu.

use crate::error::WalletError;

/// The shipped bet menu.
pub const BET_OPTIONS: [u64; 6] = [1, 5, 10, 25, 50, 100];

/// Bet selected on first launch.
pub const DEFAULT_BET: u64 = 10;

/// Balance on first launch.
pub const DEFAULT_BALANCE: u64 = 1000;

/// A bet amount known to be on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bet(u64);

impl Bet {
    /// Validate `amount` against `menu`.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidBet`] if the amount is not on the menu.
    pub fn from_menu(amount: u64, menu: &[u64]) -> Result<Self, WalletError> {
        if amount > 0 && menu.contains(&amount) {
            Ok(Self(amount))
        } else {
            Err(WalletError::InvalidBet { amount })
        }
    }

    /// The amount in credits.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl Default for Bet {
    fn default() -> Self {
        Self(DEFAULT_BET)
    }
}

/// Balance plus the current bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    balance: u64,
    bet: Bet,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE, Bet::default())
    }
}

impl Wallet {
    /// A wallet with the given balance and bet.
    #[must_use]
    pub const fn new(balance: u64, bet: Bet) -> Self {
        Self { balance, bet }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Current bet.
    #[must_use]
    pub const fn bet(&self) -> Bet {
        self.bet
    }

    /// True if the balance covers one bet.
    #[must_use]
    pub const fn covers_bet(&self) -> bool {
        self.balance >= self.bet.0
    }

    /// Add credits. Returns the new balance.
    pub fn deposit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Set the balance to zero.
    pub fn reset(&mut self) {
        self.balance = 0;
    }

    /// Apply a signed delta, clamping at zero. Returns the new balance.
    pub fn apply(&mut self, delta: i64) -> u64 {
        self.balance = if delta >= 0 {
            self.balance.saturating_add(delta.unsigned_abs())
        } else {
            self.balance.saturating_sub(delta.unsigned_abs())
        };
        self.balance
    }

    /// Take one bet from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InsufficientBalance`] without touching the
    /// balance if it does not cover the bet.
    pub fn debit_bet(&mut self) -> Result<u64, WalletError> {
        if !self.covers_bet() {
            return Err(WalletError::InsufficientBalance {
                balance: self.balance,
                bet: self.bet.0,
            });
        }
        self.balance -= self.bet.0;
        Ok(self.balance)
    }

    /// Change the bet.
    pub fn set_bet(&mut self, bet: Bet) {
        self.bet = bet;
    }
}
