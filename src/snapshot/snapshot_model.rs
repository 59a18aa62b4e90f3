use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::fx::CurrencyConverter;
use crate::grouping::GroupByTaxonomy;
use crate::ledger::LedgerRef;
use crate::money::Money;
use crate::positions::Position;
use crate::taxonomies::Taxonomy;

/// Holdings of one portfolio as of a date.
///
/// Created once by [`PortfolioSnapshot::create`] or
/// [`PortfolioSnapshot::merge`] and never mutated afterwards; every
/// derived view (total value, taxonomy grouping) is computed on demand.
/// Positions are unique per instrument and always carry a nonzero share
/// count.
#[derive(Clone)]
pub struct PortfolioSnapshot {
    pub(crate) source: LedgerRef,
    pub(crate) converter: Arc<CurrencyConverter>,
    pub(crate) as_of: NaiveDate,
    pub(crate) positions: Vec<Position>,
}

impl std::fmt::Debug for PortfolioSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSnapshot")
            .field("as_of", &self.as_of)
            .field("positions", &self.positions)
            .finish_non_exhaustive()
    }
}

impl PortfolioSnapshot {
    pub(crate) fn from_parts(
        source: LedgerRef,
        converter: Arc<CurrencyConverter>,
        as_of: NaiveDate,
        positions: Vec<Position>,
    ) -> Self {
        PortfolioSnapshot {
            source,
            converter,
            as_of,
            positions,
        }
    }

    /// The portfolio this snapshot was derived from.
    pub fn source(&self) -> &LedgerRef {
        &self.source
    }

    /// The conversion context bound to this snapshot; carries the
    /// reporting currency.
    pub fn currency_converter(&self) -> &Arc<CurrencyConverter> {
        &self.converter
    }

    /// The valuation date.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Per-instrument holding records, one per instrument.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Map view of the positions keyed by instrument id.
    pub fn positions_by_instrument(&self) -> HashMap<&str, &Position> {
        self.positions
            .iter()
            .map(|p| (p.instrument_id.as_str(), p))
            .collect()
    }

    /// Total snapshot value in the reporting currency: each position's
    /// native value converted as of the snapshot date, then summed with
    /// currency-safe addition. An empty snapshot totals zero.
    pub fn value(&self) -> Result<Money> {
        let term_currency = self.converter.term_currency().to_string();
        let mut converted = Vec::with_capacity(self.positions.len());
        for position in &self.positions {
            converted.push(position.value_in(&self.converter, self.as_of)?);
        }
        Money::sum(converted, term_currency)
    }

    /// Partitions the positions by a classification hierarchy.
    pub fn group_by_taxonomy(&self, taxonomy: &Taxonomy) -> Result<GroupByTaxonomy> {
        crate::grouping::group_by_taxonomy(self, taxonomy)
    }
}
