//! Symbol table and pool sanity checks.
//!
//! These should never trigger for a table built through [`SymbolTable`] and a
//! pool rebuilt after every edit. A violation means a bug.

use crate::pool::Pool;
use crate::symbols::SymbolTable;
use std::collections::{BTreeMap, BTreeSet};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every table and pool invariant.
///
/// Returns the violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(table: &SymbolTable, pool: &Pool) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    let mut seen = BTreeSet::new();
    for symbol in table {
        if !seen.insert(symbol.id.as_str()) {
            push(format!("duplicate symbol id {}", symbol.id));
        }
        if symbol.weight == 0 {
            push(format!("symbol {} has zero weight", symbol.id));
        }
        if symbol.is_skull() {
            if symbol.is_wild {
                push("skull is marked wild".to_string());
            }
            if symbol.payout3.is_positive() || symbol.payout2.is_positive() {
                push(format!(
                    "skull has positive payouts {} / {}",
                    symbol.payout3, symbol.payout2
                ));
            }
        }
    }

    // Pool length equals total weight
    let total = table.total_weight();
    if u64::try_from(pool.len()).unwrap_or(u64::MAX) != total {
        push(format!(
            "pool has {} slots but total weight is {}",
            pool.len(),
            total
        ));
    }

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for id in pool.slots() {
        *counts.entry(id.as_str()).or_default() += 1;
    }
    for symbol in table {
        let found = counts.remove(symbol.id.as_str()).unwrap_or(0);
        if found != u64::from(symbol.weight) {
            push(format!(
                "symbol {} appears {} times in pool, weight {}",
                symbol.id, found, symbol.weight
            ));
        }
    }
    for id in counts.keys() {
        push(format!("pool holds unknown symbol id {id}"));
    }

    violations
}
