use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::QUANTITY_THRESHOLD;
use crate::errors::Result;
use crate::fx::CurrencyConverter;
use crate::ledger::Transaction;
use crate::money::Money;

/// Returns true if a share count is above the significance threshold.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 8));
    quantity.abs() >= threshold
}

/// Net exposure to one instrument within a snapshot.
///
/// Immutable once aggregated: a position is built from a transaction
/// subsequence and a price, and never changes afterwards. Within a
/// snapshot the share count is nonzero by construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Identity reference into the shared instrument catalog.
    pub instrument_id: String,
    /// The instrument's native currency; cost basis and valuation are
    /// denominated in it.
    pub currency: String,
    /// Net shares held (signed).
    pub quantity: Decimal,
    /// Total cost basis of the remaining shares.
    pub total_cost_basis: Decimal,
    /// Average cost per share; zero when the net quantity is not positive.
    pub average_cost: Decimal,
    /// Price per share as of the snapshot date. `None` when the price
    /// source had no quote; such a position values at zero.
    pub price: Option<Decimal>,
}

impl Position {
    /// Aggregates a transaction subsequence into one holding record.
    ///
    /// `transactions` must all reference the same instrument; they are
    /// processed in date order. Buys add shares at cost, sells relieve
    /// cost basis at the running average. A sell beyond the held
    /// quantity is clamped and logged, not an error.
    pub fn aggregate(
        instrument_id: &str,
        price: Option<Decimal>,
        transactions: &[&Transaction],
    ) -> Position {
        let currency = transactions
            .first()
            .map(|t| t.currency.clone())
            .unwrap_or_default();

        let mut ordered: Vec<&Transaction> = transactions.to_vec();
        ordered.sort_by_key(|t| t.date);

        let mut quantity = Decimal::ZERO;
        let mut cost_basis = Decimal::ZERO;

        for transaction in ordered {
            if transaction.currency != currency {
                warn!(
                    "Skipping transaction {} for {}: currency {} does not match position currency {}",
                    transaction.id, instrument_id, transaction.currency, currency
                );
                continue;
            }

            let delta = transaction.signed_quantity();
            if delta.is_sign_positive() {
                quantity += delta;
                cost_basis += delta * transaction.unit_price + transaction.fee;
            } else {
                let mut sold = -delta;
                if sold > quantity {
                    warn!(
                        "Transaction {} sells {} of {} but only {} held; clamping",
                        transaction.id, sold, instrument_id, quantity
                    );
                    sold = quantity;
                }
                // Relieve cost basis at the running average.
                let relief = if quantity.is_zero() {
                    Decimal::ZERO
                } else {
                    cost_basis * sold / quantity
                };
                quantity -= sold;
                cost_basis -= relief;
            }
        }

        Position::from_aggregates(instrument_id, currency, quantity, cost_basis, price)
    }

    /// Merges two holding records for the same instrument.
    ///
    /// Share counts and cost bases add, so the operation is commutative
    /// and associative; merge order across snapshots does not change
    /// the result.
    pub fn merge(a: &Position, b: &Position) -> Position {
        if a.instrument_id != b.instrument_id {
            warn!(
                "Merging positions with different instruments: {} and {}",
                a.instrument_id, b.instrument_id
            );
        }
        Position::from_aggregates(
            &a.instrument_id,
            a.currency.clone(),
            a.quantity + b.quantity,
            a.total_cost_basis + b.total_cost_basis,
            a.price.or(b.price),
        )
    }

    fn from_aggregates(
        instrument_id: &str,
        currency: String,
        quantity: Decimal,
        total_cost_basis: Decimal,
        price: Option<Decimal>,
    ) -> Position {
        let average_cost = if quantity.is_sign_positive() && is_quantity_significant(&quantity) {
            total_cost_basis / quantity
        } else {
            Decimal::ZERO
        };
        Position {
            instrument_id: instrument_id.to_string(),
            currency,
            quantity,
            total_cost_basis,
            average_cost,
            price,
        }
    }

    /// Market value in the instrument's native currency: shares times
    /// the as-of price. A position without a price values at zero.
    pub fn value(&self) -> Money {
        match self.price {
            Some(price) => Money::new(self.quantity * price, self.currency.clone()),
            None => Money::zero(self.currency.clone()),
        }
    }

    /// Market value converted into a converter's term currency as of
    /// `date`.
    pub fn value_in(&self, converter: &CurrencyConverter, date: NaiveDate) -> Result<Money> {
        Ok(converter.convert(&self.value(), date)?)
    }
}
