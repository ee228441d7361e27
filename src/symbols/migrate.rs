//! Upgrades for symbol tables saved by older versions.
//!
//! - `bca` entries become the skull, keeping their weight (2 if it was 0).
//! - A `seven` entry becomes the skull; a table without a skull gains one.
//! - Built-in ids get their payouts reset to the shipped values.
//! - Duplicate ids are dropped (first wins), zero weights become 1 and the
//!   skull loses any wild flag.

use super::{Symbol, SymbolTable, default_skull, default_symbols};
use std::collections::HashSet;
use tracing::info;

/// Weight given to a migrated `bca` entry that had none.
const LEGACY_SKULL_WEIGHT: u32 = 2;

/// Migrate a loaded symbol list into a valid table.
///
/// Returns the table and whether anything changed (so the caller can write
/// it back).
#[must_use]
pub fn migrate(symbols: Vec<Symbol>) -> (SymbolTable, bool) {
    let mut changed = false;

    let mut symbols: Vec<Symbol> = symbols
        .into_iter()
        .map(|s| {
            if s.id == *"bca" {
                changed = true;
                info!(weight = s.weight, "migrating legacy bca symbol to skull");
                let weight = if s.weight == 0 {
                    LEGACY_SKULL_WEIGHT
                } else {
                    s.weight
                };
                Symbol {
                    weight,
                    ..default_skull()
                }
            } else {
                s
            }
        })
        .collect();

    if let Some(seven) = symbols.iter_mut().find(|s| s.id == *"seven") {
        info!("replacing legacy seven symbol with skull");
        *seven = default_skull();
        changed = true;
    } else if !symbols.iter().any(Symbol::is_skull) {
        info!("symbol table has no skull, appending one");
        symbols.push(default_skull());
        changed = true;
    }

    let builtin = default_symbols();
    for symbol in &mut symbols {
        if let Some(reference) = builtin.iter().find(|b| b.id == symbol.id)
            && (symbol.payout3 != reference.payout3 || symbol.payout2 != reference.payout2)
        {
            symbol.payout3 = reference.payout3;
            symbol.payout2 = reference.payout2;
            changed = true;
        }
    }

    let mut seen = HashSet::new();
    let before = symbols.len();
    symbols.retain(|s| seen.insert(s.id.clone()));
    changed |= symbols.len() != before;

    for symbol in &mut symbols {
        if symbol.weight == 0 {
            symbol.weight = 1;
            changed = true;
        }
        if symbol.is_skull() && symbol.is_wild {
            symbol.is_wild = false;
            changed = true;
        }
    }

    (SymbolTable::from_vec_unchecked(symbols), changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Multiplier, SymbolDisplay, SymbolId};

    fn legacy(id: &str, weight: u32) -> Symbol {
        Symbol {
            id: SymbolId::new(id),
            name: id.to_uppercase(),
            display: SymbolDisplay::glyph("?"),
            weight,
            payout3: Multiplier::whole(7),
            payout2: Multiplier::whole(1),
            is_wild: false,
        }
    }

    #[test]
    fn test_defaults_unchanged() {
        let (table, changed) = migrate(default_symbols());
        assert!(!changed);
        assert_eq!(table, SymbolTable::defaults());
    }

    #[test]
    fn test_bca_becomes_skull_with_weight() {
        let mut symbols = default_symbols();
        symbols.retain(|s| !s.is_skull());
        symbols.push(legacy("bca", 5));
        let (table, changed) = migrate(symbols);
        assert!(changed);
        let skull = table.get("skull").unwrap();
        assert_eq!(skull.weight, 5);
        assert_eq!(skull.payout3, Multiplier::whole(-20));
        assert!(!table.contains("bca"));
    }

    #[test]
    fn test_weightless_bca_gets_default_skull_weight() {
        let (table, changed) = migrate(vec![legacy("cherry", 6), legacy("bca", 0)]);
        assert!(changed);
        assert_eq!(table.get("skull").unwrap().weight, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_seven_replaced_in_place() {
        let mut symbols = default_symbols();
        symbols.retain(|s| !s.is_skull());
        symbols.insert(1, legacy("seven", 4));
        let (table, changed) = migrate(symbols);
        assert!(changed);
        assert_eq!(table.as_slice()[1].id.as_str(), "skull");
        assert_eq!(table.as_slice()[1].weight, 2);
    }

    #[test]
    fn test_missing_skull_appended() {
        let (table, changed) = migrate(vec![legacy("cherry", 6)]);
        assert!(changed);
        assert_eq!(table.len(), 2);
        assert!(table.as_slice()[1].is_skull());
        // Built-in payouts are enforced
        assert_eq!(table.get("cherry").unwrap().payout3, Multiplier::whole(5));
    }

    #[test]
    fn test_sanitizes_duplicates_and_weights() {
        let mut symbols = default_symbols();
        symbols.push(legacy("cherry", 1));
        symbols[0].weight = 0;
        let (table, changed) = migrate(symbols);
        assert!(changed);
        assert_eq!(table.len(), 8);
        assert_eq!(table.get("cherry").unwrap().weight, 1);
    }
}
