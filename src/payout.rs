//! Payout evaluation for the center row.
//!
//! Rules are checked in order and the first that applies decides the result:
//!
//! 1. Two or more skulls: the skull's penalty multiplier. Wilds never count
//!    towards or soften a skull penalty.
//! 2. Three of a kind, with wilds filling in for any non-wild symbol, or three
//!    wilds.
//! 3. Two of a kind on the same terms, or two wilds.
//! 4. Otherwise no win.
//!
//! Within rules 2 and 3 the candidate with the greatest amount wins. The
//! running best starts at zero, so a candidate must pay out something to be
//! chosen. Candidates are visited in order of first appearance on the reels
//! (left to right), with the all-wild candidate last, and ties keep the
//! earlier one.
//!
//! The all-wild candidates pay the multipliers of the first wild in table
//! order, whichever wilds are showing.

use crate::symbols::{Symbol, SymbolId, SymbolTable};
use serde::Serialize;

/// Which rule produced a payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoutKind {
    /// Two or three skulls.
    SkullPenalty {
        /// Number of skulls on the center row.
        count: u8,
    },
    /// Three of a non-wild symbol.
    ThreeOfAKind {
        /// The matched symbol.
        symbol: SymbolId,
        /// Whether wilds completed the match.
        with_wild: bool,
    },
    /// Three wilds.
    ThreeWilds {
        /// The wild used as the payout reference.
        symbol: SymbolId,
    },
    /// Two of a non-wild symbol.
    TwoOfAKind {
        /// The matched symbol.
        symbol: SymbolId,
        /// Whether a wild completed the match.
        with_wild: bool,
    },
    /// Two or more wilds with no better match.
    TwoWilds {
        /// The wild used as the payout reference.
        symbol: SymbolId,
    },
    /// Nothing matched.
    NoWin,
}

/// Outcome of evaluating one spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payout {
    /// Signed credit delta.
    pub amount: i64,
    /// Human-readable summary.
    pub description: String,
    /// Rule that produced the amount.
    pub kind: PayoutKind,
    /// Reels that took part in the result.
    pub winning_reels: [bool; 3],
}

impl Payout {
    fn no_win() -> Self {
        Self {
            amount: 0,
            description: "No win".to_string(),
            kind: PayoutKind::NoWin,
            winning_reels: [false; 3],
        }
    }

    /// True if credits are paid out.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.amount > 0
    }

    /// True if credits are taken.
    #[must_use]
    pub fn is_penalty(&self) -> bool {
        self.amount < 0
    }
}

/// Evaluate the center row for a bet.
///
/// Pure: reads only the table, the three symbols and the bet. The table
/// supplies the reference wild; if it has none, the leftmost wild showing
/// is used.
#[must_use]
pub fn evaluate(table: &SymbolTable, centers: [&Symbol; 3], bet: u64) -> Payout {
    if let Some(penalty) = skull_penalty(centers, bet) {
        return penalty;
    }

    let wild_count = centers.iter().filter(|s| s.is_wild).count();
    let wild_ref = table
        .first_wild()
        .or_else(|| centers.iter().copied().find(|s| s.is_wild));

    // Distinct non-wild symbols in order of first appearance
    let mut groups: Vec<(&Symbol, usize)> = Vec::with_capacity(3);
    for symbol in centers.iter().copied().filter(|s| !s.is_wild) {
        if let Some(group) = groups.iter_mut().find(|(g, _)| g.id == symbol.id) {
            group.1 += 1;
        } else {
            groups.push((symbol, 1));
        }
    }

    let mut best: Option<Payout> = None;

    for &(symbol, count) in &groups {
        if count + wild_count >= 3 {
            let with_wild = count < 3;
            offer(&mut best, symbol.payout3.apply(bet), || Payout {
                amount: 0,
                description: kind_description(3, &symbol.name, with_wild),
                kind: PayoutKind::ThreeOfAKind {
                    symbol: symbol.id.clone(),
                    with_wild,
                },
                winning_reels: [true; 3],
            });
        }
    }
    if wild_count == 3
        && let Some(wild) = wild_ref
    {
        offer(&mut best, wild.payout3.apply(bet), || Payout {
            amount: 0,
            description: "3 WILDs".to_string(),
            kind: PayoutKind::ThreeWilds {
                symbol: wild.id.clone(),
            },
            winning_reels: [true; 3],
        });
    }
    if let Some(payout) = best {
        return payout;
    }

    for &(symbol, count) in &groups {
        if count + wild_count >= 2 {
            let with_wild = count < 2;
            offer(&mut best, symbol.payout2.apply(bet), || Payout {
                amount: 0,
                description: kind_description(2, &symbol.name, with_wild),
                kind: PayoutKind::TwoOfAKind {
                    symbol: symbol.id.clone(),
                    with_wild,
                },
                winning_reels: centers.map(|s| s.is_wild || s.id == symbol.id),
            });
        }
    }
    if wild_count >= 2
        && let Some(wild) = wild_ref
    {
        offer(&mut best, wild.payout2.apply(bet), || Payout {
            amount: 0,
            description: "2 WILDs".to_string(),
            kind: PayoutKind::TwoWilds {
                symbol: wild.id.clone(),
            },
            winning_reels: centers.map(|s| s.is_wild),
        });
    }

    best.unwrap_or_else(Payout::no_win)
}

fn skull_penalty(centers: [&Symbol; 3], bet: u64) -> Option<Payout> {
    let count = centers.iter().filter(|s| s.is_skull()).count();
    if count < 2 {
        return None;
    }
    let skull = centers.iter().copied().find(|s| s.is_skull())?;
    let (multiplier, count) = if count >= 3 {
        (skull.payout3, 3u8)
    } else {
        (skull.payout2, 2u8)
    };
    Some(Payout {
        amount: multiplier.apply(bet),
        description: format!("Skull penalty ({count}×)"),
        kind: PayoutKind::SkullPenalty { count },
        winning_reels: centers.map(Symbol::is_skull),
    })
}

/// Replace `best` if `amount` beats it (or beats zero when there is none).
fn offer(best: &mut Option<Payout>, amount: i64, build: impl FnOnce() -> Payout) {
    let floor = best.as_ref().map_or(0, |b| b.amount);
    if amount > floor {
        *best = Some(Payout { amount, ..build() });
    }
}

fn kind_description(n: u8, name: &str, with_wild: bool) -> String {
    if with_wild {
        format!("{n}-of-a-kind {name} (with WILD)")
    } else {
        format!("{n}-of-a-kind {name}")
    }
}
