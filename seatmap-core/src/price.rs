//! Fixed price-tier lookup

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A monetary amount in minor units (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_whole(units: u64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// `$150.00`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Tier -> price table
pub const PRICE_TIERS: [(i32, Money); 5] = [
    (1, Money::from_whole(50)),
    (2, Money::from_whole(75)),
    (3, Money::from_whole(100)),
    (4, Money::from_whole(150)),
    (5, Money::from_whole(200)),
];

/// Price of a tier. Unknown tiers cost [`Money::ZERO`]; a zero price does
/// not mean the tier exists.
pub fn price_for_tier(tier: i32) -> Money {
    PRICE_TIERS
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, price)| *price)
        .unwrap_or(Money::ZERO)
}
