//! Persistent application state.

use crate::config::GameConfig;
use crate::error::StoreError;
use crate::sound::{SoundSettings, SoundStyle};
use crate::store::{Store, keys, load_or, save};
use crate::symbols::{Symbol, SymbolTable, default_symbols, migrate};
use crate::wallet::{Bet, Wallet};
use tracing::{info, warn};

/// Everything that survives between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Balance and bet.
    pub wallet: Wallet,
    /// Active symbol table.
    pub symbols: SymbolTable,
    /// Mute flag and sound style.
    pub sound: SoundSettings,
}

impl GameState {
    /// Fresh state from the config defaults.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            wallet: Wallet::new(config.starting_balance, default_bet(config)),
            symbols: SymbolTable::defaults(),
            sound: SoundSettings::default(),
        }
    }

    /// Load each key independently, falling back to its default.
    ///
    /// The symbol table is migrated on the way in and written back if the
    /// migration changed it.
    pub fn load<S: Store + ?Sized>(store: &mut S, config: &GameConfig) -> Self {
        let balance: u64 = load_or(store, keys::BALANCE, config.starting_balance);

        let fallback_bet = default_bet(config);
        let bet_amount: u64 = load_or(store, keys::BET, fallback_bet.amount());
        let bet = Bet::from_menu(bet_amount, &config.bet_options).unwrap_or_else(|e| {
            warn!(error = %e, "stored bet not on menu, using default");
            fallback_bet
        });

        let raw: Vec<Symbol> = load_or(store, keys::SYMBOLS, default_symbols());
        let (symbols, migrated) = migrate(raw);
        if migrated {
            info!(symbols = symbols.len(), "symbol table migrated");
            if let Err(e) = save(store, keys::SYMBOLS, &symbols) {
                warn!(error = %e, "cannot write migrated symbol table");
            }
        }

        let mute: bool = load_or(store, keys::MUTE, false);
        let style: SoundStyle = load_or(store, keys::SOUND, SoundStyle::default());

        Self {
            wallet: Wallet::new(balance, bet),
            symbols,
            sound: SoundSettings { mute, style },
        }
    }

    /// Write every key.
    ///
    /// # Errors
    ///
    /// Returns the first store error.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save(store, keys::BALANCE, &self.wallet.balance())?;
        save(store, keys::BET, &self.wallet.bet().amount())?;
        save(store, keys::SYMBOLS, &self.symbols)?;
        save(store, keys::MUTE, &self.sound.mute)?;
        save(store, keys::SOUND, &self.sound.style)
    }
}

fn default_bet(config: &GameConfig) -> Bet {
    Bet::from_menu(config.default_bet, &config.bet_options).unwrap_or_default()
}
