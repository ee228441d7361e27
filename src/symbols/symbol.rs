//! A single reel symbol.

use super::Multiplier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the penalty symbol.
pub const SKULL_ID: &str = "skull";

/// Longest slug taken from a user-authored symbol name.
const MAX_SLUG_LEN: usize = 18;

/// Unique identifier of a symbol within a table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(String);

impl SymbolId {
    /// Wrap a string as a symbol id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the reserved penalty id.
    #[must_use]
    pub fn is_skull(&self) -> bool {
        self.0 == SKULL_ID
    }

    /// Build the id for a user-authored symbol.
    ///
    /// The name is lowercased, every run of characters outside `[a-z0-9]`
    /// becomes `_`, the result is cut to 18 characters and suffixed with the
    /// creation time in base 36.
    #[must_use]
    pub fn for_new_symbol(name: &str, created_millis: u64) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut in_gap = false;
        for c in name.to_lowercase().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                slug.push(c);
                in_gap = false;
            } else if !in_gap {
                slug.push('_');
                in_gap = true;
            }
        }
        let slug: String = slug.chars().take(MAX_SLUG_LEN).collect();
        Self(format!("{slug}_{}", base36(created_millis)))
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for SymbolId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// How a symbol is drawn on a reel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SymbolDisplay {
    /// A text glyph, usually a single emoji.
    #[serde(rename = "text")]
    Glyph {
        /// The glyph text.
        display: String,
    },
    /// An image reference (file path or data URL).
    #[serde(rename = "image")]
    Image {
        /// Where the image lives.
        #[serde(rename = "dataUrl")]
        source: String,
    },
}

impl SymbolDisplay {
    /// A glyph display.
    #[must_use]
    pub fn glyph(text: impl Into<String>) -> Self {
        SymbolDisplay::Glyph {
            display: text.into(),
        }
    }

    /// An image display.
    #[must_use]
    pub fn image(source: impl Into<String>) -> Self {
        SymbolDisplay::Image {
            source: source.into(),
        }
    }

    /// Text to show in a terminal cell.
    ///
    /// Images cannot be drawn in a terminal, so they fall back to `❔`.
    #[must_use]
    pub fn cell_text(&self) -> &str {
        match self {
            SymbolDisplay::Glyph { display } if !display.is_empty() => display,
            _ => "❔",
        }
    }
}

/// A weighted reel symbol with its payout multipliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique id within the table.
    pub id: SymbolId,
    /// Display name used in payout descriptions.
    pub name: String,
    /// How the symbol is drawn.
    #[serde(flatten)]
    pub display: SymbolDisplay,
    /// Number of pool slots the symbol occupies.
    pub weight: u32,
    /// Multiplier for three of a kind.
    pub payout3: Multiplier,
    /// Multiplier for two of a kind.
    pub payout2: Multiplier,
    /// Whether the symbol substitutes for others.
    #[serde(rename = "isWild", default)]
    pub is_wild: bool,
}

impl Symbol {
    /// True for the reserved penalty symbol.
    #[must_use]
    pub fn is_skull(&self) -> bool {
        self.id.is_skull()
    }
}

/// User-entered fields for a new symbol.
///
/// Out-of-range values are clamped rather than rejected: weight to at least 1,
/// the three-of-a-kind multiplier to at least 1, the two-of-a-kind multiplier
/// to at least 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSymbol {
    /// Display name.
    pub name: String,
    /// Requested weight.
    pub weight: i64,
    /// Requested three-of-a-kind multiplier.
    pub payout3: Multiplier,
    /// Requested two-of-a-kind multiplier.
    pub payout2: Multiplier,
    /// Whether the symbol is wild.
    pub is_wild: bool,
    /// How the symbol is drawn.
    pub display: SymbolDisplay,
}

impl NewSymbol {
    /// Clamp the fields and build the symbol under the given id.
    #[must_use]
    pub fn into_symbol(self, id: SymbolId) -> Symbol {
        let weight = u32::try_from(self.weight.max(1)).unwrap_or(u32::MAX);
        Symbol {
            id,
            name: self.name.trim().to_string(),
            display: self.display,
            weight,
            payout3: self.payout3.at_least(Multiplier::whole(1)),
            payout2: self.payout2.at_least(Multiplier::ZERO),
            is_wild: self.is_wild,
        }
    }
}
