// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Lucky Frogs: a three-reel slot machine with a configurable symbol table.
//!
//! Each reel's center symbol is drawn from a pool in which every symbol
//! appears as many times as its weight. The three centers are scored by
//! [`payout::evaluate`], the result is applied to a persistent credit
//! balance, and the whole session survives restarts through a [`store::Store`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / TUI (lucky-frogs binary)    │
//! ├─────────────────────────────────────┤
//! │   SlotMachine (spin lifecycle)      │
//! ├──────────────┬──────────────────────┤
//! │ Pool + Payout│ Wallet, Sound, Store │
//! ├──────────────┴──────────────────────┤
//! │   SymbolTable (+ migration)         │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod invariants;
pub mod machine;
pub mod payout;
pub mod pool;
pub mod simulate;
pub mod sound;
pub mod store;
pub mod symbols;
pub mod wallet;

pub use config::{GameConfig, ReelTiming};
pub use error::{ActionError, DrawError, SpinError, StoreError, SymbolError, WalletError};
pub use machine::{Column, GameState, SlotMachine, SpinEvent, SpinReport};
pub use payout::{Payout, PayoutKind, evaluate};
pub use pool::Pool;
pub use symbols::{Multiplier, NewSymbol, Symbol, SymbolId, SymbolTable};
pub use wallet::{Bet, Wallet};
