use chrono::NaiveDate;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::fx::CurrencyConverter;
use crate::ledger::{LedgerRef, Transaction, TransactionLedgerTrait};
use crate::positions::{is_quantity_significant, Position};
use crate::quotes::PriceSourceTrait;
use crate::snapshot::PortfolioSnapshot;

/// Groups transactions by instrument identity, preserving first-seen
/// order of the instruments.
fn group_by_instrument<'a>(transactions: &[&'a Transaction]) -> Vec<(String, Vec<&'a Transaction>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a Transaction>)> = Vec::new();

    for transaction in transactions {
        match index.get(transaction.instrument_id.as_str()) {
            Some(&i) => groups[i].1.push(transaction),
            None => {
                index.insert(transaction.instrument_id.as_str(), groups.len());
                groups.push((transaction.instrument_id.clone(), vec![transaction]));
            }
        }
    }

    groups
}

impl PortfolioSnapshot {
    /// Builds a snapshot of `portfolio` as of `date`.
    ///
    /// Transactions dated after `date` are excluded (the cutoff is
    /// inclusive), the rest are grouped by instrument and aggregated
    /// into holding records, and records that net to zero shares are
    /// discarded. A portfolio with no transactions yields a valid empty
    /// snapshot. Prices come from `prices` once per instrument; a
    /// missing price is logged and the position carries `price: None`.
    pub fn create(
        portfolio: LedgerRef,
        prices: &dyn PriceSourceTrait,
        converter: Arc<CurrencyConverter>,
        date: NaiveDate,
    ) -> PortfolioSnapshot {
        let filtered: Vec<&Transaction> = portfolio
            .transactions()
            .iter()
            .filter(|t| t.date <= date)
            .collect();

        // Grouping completes before any aggregation starts; the
        // per-instrument aggregations are then independent of each
        // other and run as a parallel map.
        let groups = group_by_instrument(&filtered);
        debug!(
            "Building snapshot of '{}' as of {}: {} transactions in {} instrument groups",
            portfolio.name(),
            date,
            filtered.len(),
            groups.len()
        );

        let positions: Vec<Position> = groups
            .par_iter()
            .map(|(instrument_id, transactions)| {
                let price = prices.price_of(instrument_id, date);
                if price.is_none() {
                    warn!(
                        "No price for {} as of {}; position will value at zero",
                        instrument_id, date
                    );
                }
                Position::aggregate(instrument_id, price, transactions)
            })
            .filter(|position| is_quantity_significant(&position.quantity))
            .collect();

        PortfolioSnapshot::from_parts(portfolio, converter, date, positions)
    }
}
