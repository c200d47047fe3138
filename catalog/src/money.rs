//! Budget amounts.
//!
//! Departments declare budgets in different units (rupees, thousands, lakhs).
//! Every amount is normalized to integer paisa when a catalog is assembled, so
//! sums across departments never mix units and never lose precision.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Unit a department's seed budgets are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum BudgetUnit {
    Paisa,
    #[default]
    Rupee,
    Thousand,
    Lakh,
    Crore,
}

impl BudgetUnit {
    /// Paisa in one of this unit.
    pub fn paisa_per_unit(&self) -> u64 {
        match self {
            Self::Paisa => 1,
            Self::Rupee => 100,
            Self::Thousand => 100_000,
            Self::Lakh => 10_000_000,
            Self::Crore => 1_000_000_000,
        }
    }
}

/// A non-negative amount of money held in paisa (1/100 rupee).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_paisa(paisa: u64) -> Self {
        Self(paisa)
    }

    pub fn from_rupees(rupees: u64) -> Self {
        Self::from_units(rupees, BudgetUnit::Rupee)
    }

    /// Normalize an amount in `unit`. Saturates rather than wrapping.
    pub fn from_units(amount: u64, unit: BudgetUnit) -> Self {
        Self(amount.saturating_mul(unit.paisa_per_unit()))
    }

    pub fn paisa(&self) -> u64 {
        self.0
    }

    pub fn rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Amount expressed in `unit`, for display.
    pub fn in_unit(&self, unit: BudgetUnit) -> f64 {
        self.0 as f64 / unit.paisa_per_unit() as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs. {}.{:02}", self.0 / 100, self.0 % 100)
    }
}
