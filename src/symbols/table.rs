//! Ordered, id-unique symbol table.

use super::{NewSymbol, Symbol, SymbolId, default_symbols};
use crate::error::SymbolError;
use serde::{Deserialize, Serialize};

/// The active symbol set, in table order.
///
/// Ids are unique and every weight is at least 1. The skull is never wild
/// and never pays out. Edits replace whole symbols; there are no partial
/// updates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Build a table, checking id uniqueness, weights and the skull.
    ///
    /// # Errors
    ///
    /// Same as [`SymbolTable::add`].
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, SymbolError> {
        let mut table = Self::default();
        for symbol in symbols {
            table.add(symbol)?;
        }
        Ok(table)
    }

    /// The built-in table.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            symbols: default_symbols(),
        }
    }

    /// Wrap symbols without validation. Callers must uphold the invariants.
    pub(crate) fn from_vec_unchecked(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Symbols in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// Symbols as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when no symbols remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up a symbol by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == *id)
    }

    /// True if a symbol with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The first wild symbol in table order.
    #[must_use]
    pub fn first_wild(&self) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.is_wild)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.symbols.iter().map(|s| u64::from(s.weight)).sum()
    }

    /// Append a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::DuplicateId`] if the id is taken,
    /// [`SymbolError::ZeroWeight`] if the weight is zero, or
    /// [`SymbolError::InvalidSkull`] for a wild or paying skull.
    pub fn add(&mut self, symbol: Symbol) -> Result<(), SymbolError> {
        if self.contains(symbol.id.as_str()) {
            return Err(SymbolError::DuplicateId(symbol.id));
        }
        check_symbol(&symbol)?;
        self.symbols.push(symbol);
        Ok(())
    }

    /// Add a user-authored symbol under a freshly generated id.
    ///
    /// A numeric suffix is appended if the generated id is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::EmptyName`] if the trimmed name is empty.
    pub fn add_new(
        &mut self,
        new: NewSymbol,
        created_millis: u64,
    ) -> Result<SymbolId, SymbolError> {
        if new.name.trim().is_empty() {
            return Err(SymbolError::EmptyName);
        }
        let base = SymbolId::for_new_symbol(new.name.trim(), created_millis);
        let mut id = base.clone();
        let mut n = 2u32;
        while self.contains(id.as_str()) {
            id = SymbolId::new(format!("{base}_{n}"));
            n += 1;
        }
        self.add(new.into_symbol(id.clone()))?;
        Ok(id)
    }

    /// Replace the symbol with the same id, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::UnknownId`] if no symbol has that id,
    /// [`SymbolError::ZeroWeight`] if the replacement has weight zero, or
    /// [`SymbolError::InvalidSkull`] for a wild or paying skull.
    pub fn replace(&mut self, symbol: Symbol) -> Result<Symbol, SymbolError> {
        check_symbol(&symbol)?;
        let slot = self
            .symbols
            .iter_mut()
            .find(|s| s.id == symbol.id)
            .ok_or_else(|| SymbolError::UnknownId(symbol.id.to_string()))?;
        Ok(std::mem::replace(slot, symbol))
    }

    /// Remove a symbol by id.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::UnknownId`] if no symbol has that id.
    pub fn remove(&mut self, id: &str) -> Result<Symbol, SymbolError> {
        let index = self
            .symbols
            .iter()
            .position(|s| s.id == *id)
            .ok_or_else(|| SymbolError::UnknownId(id.to_string()))?;
        Ok(self.symbols.remove(index))
    }

    /// Restore the built-in table, dropping custom symbols.
    pub fn reset(&mut self) {
        self.symbols = default_symbols();
    }
}

fn check_symbol(symbol: &Symbol) -> Result<(), SymbolError> {
    if symbol.weight == 0 {
        return Err(SymbolError::ZeroWeight(symbol.id.clone()));
    }
    if symbol.is_skull()
        && (symbol.is_wild || symbol.payout3.is_positive() || symbol.payout2.is_positive())
    {
        return Err(SymbolError::InvalidSkull);
    }
    Ok(())
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Multiplier, SymbolDisplay};

    fn custom(name: &str) -> NewSymbol {
        NewSymbol {
            name: name.to_string(),
            weight: 3,
            payout3: Multiplier::whole(12),
            payout2: Multiplier::whole(2),
            is_wild: false,
            display: SymbolDisplay::glyph("🪷"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let table = SymbolTable::new(default_symbols()).unwrap();
        assert_eq!(table, SymbolTable::defaults());
        assert_eq!(table.total_weight(), 31);
        assert_eq!(table.first_wild().unwrap().id.as_str(), "wild");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut table = SymbolTable::defaults();
        let dup = table.get("cherry").unwrap().clone();
        assert_eq!(
            table.add(dup),
            Err(SymbolError::DuplicateId(SymbolId::new("cherry")))
        );
    }

    #[test]
    fn test_add_new_generates_unique_ids() {
        let mut table = SymbolTable::defaults();
        let a = table.add_new(custom("Lotus"), 1000).unwrap();
        let b = table.add_new(custom("Lotus"), 1000).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.len(), 10);
        assert_eq!(table.get(b.as_str()).unwrap().name, "Lotus");
    }

    #[test]
    fn test_add_new_rejects_blank_name() {
        let mut table = SymbolTable::defaults();
        assert_eq!(table.add_new(custom("   "), 1), Err(SymbolError::EmptyName));
    }

    #[test]
    fn test_remove_and_reset() {
        let mut table = SymbolTable::defaults();
        let removed = table.remove("frog").unwrap();
        assert_eq!(removed.name, "Frog");
        assert!(!table.contains("frog"));
        assert!(matches!(table.remove("frog"), Err(SymbolError::UnknownId(_))));
        table.reset();
        assert_eq!(table, SymbolTable::defaults());
    }

    #[test]
    fn test_replace_is_whole_symbol() {
        let mut table = SymbolTable::defaults();
        let mut bell = table.get("bell").unwrap().clone();
        bell.weight = 9;
        bell.name = "Big Bell".to_string();
        let old = table.replace(bell).unwrap();
        assert_eq!(old.weight, 4);
        assert_eq!(table.get("bell").unwrap().weight, 9);
        // Position in table order is preserved
        assert_eq!(table.as_slice()[3].name, "Big Bell");
    }

    #[test]
    fn test_skull_cannot_turn_wild_or_pay() {
        let mut table = SymbolTable::defaults();
        let skull = table.get("skull").unwrap().clone();

        let wild = Symbol {
            is_wild: true,
            ..skull.clone()
        };
        assert_eq!(table.replace(wild), Err(SymbolError::InvalidSkull));

        let paying = Symbol {
            payout2: Multiplier::whole(3),
            ..skull.clone()
        };
        assert_eq!(table.replace(paying), Err(SymbolError::InvalidSkull));
        assert_eq!(table, SymbolTable::defaults());

        // A fresh table gets the same check on add
        table.remove("skull").unwrap();
        let before = table.clone();
        let positive = Symbol {
            payout3: Multiplier::whole(99),
            ..skull.clone()
        };
        assert_eq!(table.add(positive), Err(SymbolError::InvalidSkull));
        assert_eq!(table, before);

        // Harsher penalties are still allowed
        let harsher = Symbol {
            payout3: Multiplier::whole(-40),
            ..skull
        };
        assert!(table.add(harsher).is_ok());
    }
}
