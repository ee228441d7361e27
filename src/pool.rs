//! Weighted draw pool.
//!
//! The pool is the table flattened so that each symbol id appears `weight`
//! times, in table order. Drawing picks a slot uniformly, which selects each
//! symbol with probability `weight / total_weight`. The pool is the only
//! place draw probability comes from; rebuild it whenever the table changes.

use crate::error::DrawError;
use crate::symbols::{Symbol, SymbolId, SymbolTable};
use rand::Rng;

/// Flattened weighted sequence of symbol ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    slots: Vec<SymbolId>,
}

impl Pool {
    /// Build the pool from a table in O(total weight).
    #[must_use]
    pub fn build(table: &SymbolTable) -> Self {
        let capacity = usize::try_from(table.total_weight()).unwrap_or(0);
        let mut slots = Vec::with_capacity(capacity);
        for symbol in table {
            for _ in 0..symbol.weight {
                slots.push(symbol.id.clone());
            }
        }
        Self { slots }
    }

    /// Number of slots (the total weight).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in order.
    #[must_use]
    pub fn slots(&self) -> &[SymbolId] {
        &self.slots
    }

    /// How many slots hold `id`.
    #[must_use]
    pub fn occurrences(&self, id: &str) -> usize {
        self.slots.iter().filter(|s| **s == *id).count()
    }

    /// Draw one id uniformly over the slots.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::EmptyPool`] if the pool has no slots.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&SymbolId, DrawError> {
        if self.slots.is_empty() {
            return Err(DrawError::EmptyPool);
        }
        let index = rng.gen_range(0..self.slots.len());
        Ok(&self.slots[index])
    }

    /// Draw one id and resolve it against the table it was built from.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::EmptyPool`] if the pool has no slots, or
    /// [`DrawError::UnknownSymbol`] if the drawn id is missing from `table`
    /// (the pool is stale).
    pub fn draw_symbol<'t, R: Rng + ?Sized>(
        &self,
        table: &'t SymbolTable,
        rng: &mut R,
    ) -> Result<&'t Symbol, DrawError> {
        let id = self.draw(rng)?;
        table
            .get(id.as_str())
            .ok_or_else(|| DrawError::UnknownSymbol(id.clone()))
    }
}
