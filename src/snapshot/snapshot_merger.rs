use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::JOINT_PORTFOLIO_LABEL;
use crate::errors::{CalculatorError, Result};
use crate::fx::CurrencyConverter;
use crate::ledger::{JointPortfolio, TransactionLedgerTrait};
use crate::positions::Position;
use crate::snapshot::PortfolioSnapshot;

impl PortfolioSnapshot {
    /// Combines several snapshots into one joint view.
    ///
    /// A synthetic [`JointPortfolio`] becomes the source: it carries a
    /// reference account in `converter`'s term currency and the union
    /// of all source transactions, so downstream consumers that need
    /// full history get it. Positions are not re-derived from that
    /// union; holding records are merged per instrument, which is order
    /// independent because [`Position::merge`] is commutative and
    /// associative.
    ///
    /// The result takes the first snapshot's currency converter and
    /// as-of date. Inputs are expected to share both already (one
    /// client, one reporting date); disagreement is logged, not
    /// rejected. An empty input is a caller-contract violation and
    /// fails with [`CalculatorError::EmptyMergeInput`].
    pub fn merge(
        snapshots: &[PortfolioSnapshot],
        converter: Arc<CurrencyConverter>,
    ) -> Result<PortfolioSnapshot> {
        let first = snapshots
            .first()
            .ok_or(CalculatorError::EmptyMergeInput)?;

        let mut joint = JointPortfolio::new(JOINT_PORTFOLIO_LABEL, converter.term_currency());

        let mut order: Vec<String> = Vec::new();
        let mut merged: HashMap<String, Position> = HashMap::new();

        for snapshot in snapshots {
            if snapshot.as_of() != first.as_of() {
                warn!(
                    "Merging snapshot as of {} into a joint view as of {}",
                    snapshot.as_of(),
                    first.as_of()
                );
            }
            if snapshot.currency_converter().term_currency()
                != first.currency_converter().term_currency()
            {
                warn!(
                    "Merging snapshot reporting in {} into a joint view reporting in {}",
                    snapshot.currency_converter().term_currency(),
                    first.currency_converter().term_currency()
                );
            }

            joint.add_all_transactions(snapshot.source().transactions());

            for position in snapshot.positions() {
                match merged.get(&position.instrument_id) {
                    None => {
                        order.push(position.instrument_id.clone());
                        merged.insert(position.instrument_id.clone(), position.clone());
                    }
                    Some(existing) => {
                        let combined = Position::merge(existing, position);
                        merged.insert(position.instrument_id.clone(), combined);
                    }
                }
            }
        }

        let positions: Vec<Position> = order
            .iter()
            .filter_map(|instrument_id| merged.remove(instrument_id))
            .collect();

        Ok(PortfolioSnapshot::from_parts(
            Arc::new(joint),
            Arc::clone(first.currency_converter()),
            first.as_of(),
            positions,
        ))
    }
}
