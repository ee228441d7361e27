//! Fixed-point payout multipliers.
//!
//! Multipliers are stored in hundredths so that values such as `1.5` apply to
//! an integer bet exactly. Applying a multiplier rounds half up to the nearest
//! whole credit: `floor(multiplier * bet + 0.5)`.

// Conversions to and from f64 are bounded by the persisted value range
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Hundredths per whole multiplier.
const SCALE: i64 = 100;

/// A signed payout multiplier with two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(i64);

impl Multiplier {
    /// The zero multiplier.
    pub const ZERO: Self = Self(0);

    /// A whole-number multiplier.
    #[must_use]
    pub const fn whole(value: i64) -> Self {
        Self(value * SCALE)
    }

    /// A multiplier given in hundredths (`150` is `1.5`).
    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Convert from a float, rounding to the nearest hundredth.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` range.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        let scaled = (value * SCALE as f64).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    /// The value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// The value as a float, for display and serialization.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// True if the multiplier is greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Apply the multiplier to a bet, rounding half up to whole credits.
    ///
    /// The product is computed in `i128` and saturates at the `i64` bounds.
    #[must_use]
    pub fn apply(self, bet: u64) -> i64 {
        let scaled = i128::from(self.0) * i128::from(bet);
        let rounded = (scaled + i128::from(SCALE / 2)).div_euclid(i128::from(SCALE));
        rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Clamp to at least `min`.
    #[must_use]
    pub fn at_least(self, min: Self) -> Self {
        self.max(min)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE.unsigned_abs();
        let frac = abs % SCALE.unsigned_abs();
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{sign}{whole}.{}", frac / 10)
        } else {
            write!(f, "{sign}{whole}.{frac:02}")
        }
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % SCALE == 0 {
            serializer.serialize_i64(self.0 / SCALE)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Multiplier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Multiplier::from_f64(value)
            .ok_or_else(|| de::Error::custom(format!("multiplier out of range: {value}")))
    }
}
