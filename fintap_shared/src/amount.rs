use std::fmt;
use std::ops::{Add, Sub};

use num_traits::{CheckedAdd, CheckedSub, Zero};
use serde::{Deserialize, Serialize};

/// A non-negative quantity of tokens, counted in base (indivisible) units.
///
/// The backing integer is wider than any supply the ledger is expected to
/// carry, and every arithmetic path the ledger takes goes through the checked
/// operations, so running out of range surfaces as an error rather than
/// wrapping. An allowance stored at exactly [`TokenAmount::MAX`] is treated by
/// the ledger as unlimited.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// The largest representable amount.
    pub const MAX: TokenAmount = TokenAmount(u128::MAX);

    /// An amount of the given number of base units.
    pub const fn from_units(units: u128) -> Self {
        TokenAmount(units)
    }

    /// The amount as a count of base units.
    pub const fn units(&self) -> u128 {
        self.0
    }
}

impl Add for TokenAmount {
    type Output = TokenAmount;

    fn add(self, other: TokenAmount) -> TokenAmount {
        TokenAmount(self.0 + other.0)
    }
}

impl Sub for TokenAmount {
    type Output = TokenAmount;

    fn sub(self, other: TokenAmount) -> TokenAmount {
        TokenAmount(self.0 - other.0)
    }
}

impl Zero for TokenAmount {
    fn zero() -> Self {
        TokenAmount(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl CheckedAdd for TokenAmount {
    fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(TokenAmount)
    }
}

impl CheckedSub for TokenAmount {
    fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(TokenAmount)
    }
}

impl From<u128> for TokenAmount {
    fn from(units: u128) -> Self {
        TokenAmount(units)
    }
}

impl From<u64> for TokenAmount {
    fn from(units: u64) -> Self {
        TokenAmount(units as u128)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAmount({})", self.0)
    }
}
