//! Amount type for TuneVault
//!
//! Amounts are denominated in the smallest currency unit (e.g. cents) and
//! use checked arithmetic so no operation can silently wrap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Royalty rates are expressed in basis points; 10000 = 100%.
pub const MAX_BASIS_POINTS: u16 = 10_000;

/// An amount of currency in smallest units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Amount(pub u64);

impl Amount {
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Royalty cut of this amount: `floor(value * bps / 10000)`.
    ///
    /// The multiply is widened through u128 so it cannot overflow; the
    /// result always fits in u64 because `bps <= 10000`.
    pub fn royalty_share(self, bps: u16) -> Option<Self> {
        if bps > MAX_BASIS_POINTS {
            return None;
        }
        let share = (self.0 as u128 * bps as u128) / MAX_BASIS_POINTS as u128;
        Some(Self(share as u64))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display as major units with 2 decimal places (assuming cents)
        write!(f, "${:.2}", self.0 as f64 / 100.0)
    }
}
