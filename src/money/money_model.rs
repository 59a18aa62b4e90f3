//! Currency-tagged monetary amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// An amount tagged with its currency (e.g., "USD", "EUR").
///
/// Addition across currencies is a typed error, never a silent sum:
/// callers must convert first. This is what keeps valuation totals
/// honest when positions are denominated in different currencies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Money {
            amount: Decimal::ZERO,
            currency: currency.into(),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds another amount of the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        if self.currency != other.currency {
            return Err(Error::CurrencyMismatch {
                expected: self.currency.clone(),
                actual: other.currency.clone(),
            });
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency.clone(),
        })
    }

    /// Sums an iterator of amounts into a total in `currency`.
    ///
    /// An empty iterator yields zero in `currency`; any addend in a
    /// different currency fails the whole sum.
    pub fn sum<I>(amounts: I, currency: impl Into<String>) -> Result<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        let mut total = Money::zero(currency);
        for amount in amounts {
            total = total.checked_add(&amount)?;
        }
        Ok(total)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
