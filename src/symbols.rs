//! Symbol definitions and the ordered symbol table.
//!
//! A symbol carries its draw weight, its payout multipliers for three and two
//! matching reels, and whether it acts as a wild. The table preserves insertion
//! order, which is also the order symbols appear in the draw pool.
//!
//! The id `skull` is reserved for the penalty symbol: it is never wild and its
//! multipliers are negative.

mod defaults;
mod migrate;
mod multiplier;
mod symbol;
mod table;

pub use defaults::{default_skull, default_symbols};
pub use migrate::migrate;
pub use multiplier::Multiplier;
pub use symbol::{NewSymbol, SKULL_ID, Symbol, SymbolDisplay, SymbolId};
pub use table::SymbolTable;
