//! Built-in symbol set.

use super::{Multiplier, Symbol, SymbolDisplay, SymbolId};

fn builtin(
    id: &str,
    name: &str,
    glyph: &str,
    weight: u32,
    payout3: Multiplier,
    payout2: Multiplier,
) -> Symbol {
    Symbol {
        id: SymbolId::new(id),
        name: name.to_string(),
        display: SymbolDisplay::glyph(glyph),
        weight,
        payout3,
        payout2,
        is_wild: false,
    }
}

/// The penalty symbol as shipped.
#[must_use]
pub fn default_skull() -> Symbol {
    builtin("skull", "Skull", "💀", 2, Multiplier::whole(-20), Multiplier::whole(-15))
}

/// The default table, in table order.
#[must_use]
pub fn default_symbols() -> Vec<Symbol> {
    let half = Multiplier::from_hundredths;
    let x = Multiplier::whole;
    vec![
        builtin("cherry", "Cherry", "🍒", 6, x(5), half(150)),
        builtin("lemon", "Lemon", "🍋", 6, x(5), half(150)),
        builtin("grape", "Grapes", "🍇", 5, x(8), x(2)),
        builtin("bell", "Bell", "🔔", 4, x(10), x(3)),
        builtin("star", "Star", "⭐", 3, x(15), x(4)),
        default_skull(),
        builtin("frog", "Frog", "🐸", 3, x(30), x(6)),
        Symbol {
            is_wild: true,
            ..builtin("wild", "WILD", "🃏", 2, x(50), x(15))
        },
    ]
}
