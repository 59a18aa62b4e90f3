//! Tests for snapshot merging: precondition, collision handling, joint
//! portfolio semantics, and order independence.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::constants::JOINT_PORTFOLIO_LABEL;
use crate::errors::{CalculatorError, Error};
use crate::fx::CurrencyConverter;
use crate::ledger::{Instrument, Portfolio, Transaction, TransactionKind, TransactionLedgerTrait};
use crate::quotes::HistoricalPrices;
use crate::snapshot::PortfolioSnapshot;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn as_of() -> NaiveDate {
    date(2024, 6, 1)
}

fn usd_converter() -> Arc<CurrencyConverter> {
    Arc::new(CurrencyConverter::new("USD", vec![]))
}

fn instrument(id: &str) -> Instrument {
    Instrument::new(id, id, id, "USD")
}

/// Snapshot of a single-broker portfolio holding the given buys.
fn snapshot_of(
    name: &str,
    buys: &[(&Instrument, Decimal)],
    converter: &Arc<CurrencyConverter>,
) -> PortfolioSnapshot {
    let mut portfolio = Portfolio::new(name);
    for (inst, qty) in buys {
        portfolio.add_transaction(Transaction::new(
            inst,
            TransactionKind::Buy,
            date(2024, 1, 1),
            *qty,
            dec!(100),
            dec!(0),
        ));
    }
    let mut prices = HistoricalPrices::new();
    for (inst, _) in buys {
        prices.add_quote(&inst.id, date(2024, 1, 1), dec!(110));
    }
    PortfolioSnapshot::create(Arc::new(portfolio), &prices, Arc::clone(converter), as_of())
}

#[test]
fn test_merge_empty_input_fails() {
    let err = PortfolioSnapshot::merge(&[], usd_converter()).unwrap_err();
    assert!(matches!(
        err,
        Error::Calculation(CalculatorError::EmptyMergeInput)
    ));
}

#[test]
fn test_merge_disjoint_instruments_is_the_union() {
    let converter = usd_converter();
    let x = instrument("X:XNAS");
    let y = instrument("Y:XNAS");
    let a = snapshot_of("Broker A", &[(&x, dec!(5))], &converter);
    let b = snapshot_of("Broker B", &[(&y, dec!(3))], &converter);

    let merged = PortfolioSnapshot::merge(&[a, b], Arc::clone(&converter)).unwrap();

    assert_eq!(merged.positions().len(), 2);
    let by_instrument = merged.positions_by_instrument();
    assert_eq!(by_instrument.get("X:XNAS").unwrap().quantity, dec!(5));
    assert_eq!(by_instrument.get("Y:XNAS").unwrap().quantity, dec!(3));
}

#[test]
fn test_merge_combines_colliding_instruments() {
    let converter = usd_converter();
    let x = instrument("X:XNAS");
    let a = snapshot_of("Broker A", &[(&x, dec!(5))], &converter);
    let b = snapshot_of("Broker B", &[(&x, dec!(5))], &converter);

    let merged = PortfolioSnapshot::merge(&[a, b], Arc::clone(&converter)).unwrap();

    assert_eq!(merged.positions().len(), 1);
    let position = &merged.positions()[0];
    assert_eq!(position.quantity, dec!(10));
    // Both legs bought 5 @ 100
    assert_eq!(position.total_cost_basis, dec!(1000));
}

#[test]
fn test_merge_takes_first_snapshots_date_and_converter() {
    let converter = usd_converter();
    let x = instrument("X:XNAS");
    let a = snapshot_of("Broker A", &[(&x, dec!(5))], &converter);
    let first_converter = Arc::clone(a.currency_converter());
    let b = snapshot_of("Broker B", &[(&x, dec!(5))], &converter);

    let merged = PortfolioSnapshot::merge(&[a, b], usd_converter()).unwrap();

    assert_eq!(merged.as_of(), as_of());
    assert!(Arc::ptr_eq(merged.currency_converter(), &first_converter));
}

#[test]
fn test_merge_builds_joint_portfolio_with_full_history() {
    let converter = usd_converter();
    let x = instrument("X:XNAS");
    let y = instrument("Y:XNAS");
    let a = snapshot_of("Broker A", &[(&x, dec!(5))], &converter);
    let b = snapshot_of("Broker B", &[(&x, dec!(2)), (&y, dec!(3))], &converter);

    let merged = PortfolioSnapshot::merge(&[a, b], Arc::clone(&converter)).unwrap();
    let source = merged.source();

    assert_eq!(source.name(), JOINT_PORTFOLIO_LABEL);
    // Union of both transaction histories, for downstream consumers.
    assert_eq!(source.transactions().len(), 3);
    let account = source.reference_account().unwrap();
    assert_eq!(account.currency, "USD");
}

#[test]
fn test_merge_value_sums_across_sources() {
    let converter = usd_converter();
    let x = instrument("X:XNAS");
    let a = snapshot_of("Broker A", &[(&x, dec!(5))], &converter);
    let b = snapshot_of("Broker B", &[(&x, dec!(5))], &converter);

    let merged = PortfolioSnapshot::merge(&[a, b], Arc::clone(&converter)).unwrap();

    // 10 shares @ 110
    assert_eq!(merged.value().unwrap().amount(), dec!(1100));
}

#[test]
fn test_merge_all_permutations_of_three_sources_agree() {
    let converter = usd_converter();
    let x = instrument("X:XNAS");
    let y = instrument("Y:XNAS");
    let a = snapshot_of("Broker A", &[(&x, dec!(5))], &converter);
    let b = snapshot_of("Broker B", &[(&x, dec!(2)), (&y, dec!(3))], &converter);
    let c = snapshot_of("Broker C", &[(&y, dec!(7))], &converter);

    let reference = PortfolioSnapshot::merge(
        &[a.clone(), b.clone(), c.clone()],
        Arc::clone(&converter),
    )
    .unwrap();

    let permutations: Vec<Vec<PortfolioSnapshot>> = vec![
        vec![a.clone(), c.clone(), b.clone()],
        vec![b.clone(), a.clone(), c.clone()],
        vec![b.clone(), c.clone(), a.clone()],
        vec![c.clone(), a.clone(), b.clone()],
        vec![c, b, a],
    ];

    for permutation in permutations {
        let merged = PortfolioSnapshot::merge(&permutation, Arc::clone(&converter)).unwrap();
        assert_eq!(merged.positions().len(), reference.positions().len());
        for (instrument_id, expected) in reference.positions_by_instrument() {
            let actual = merged.positions_by_instrument()[instrument_id].clone();
            assert_eq!(actual.quantity, expected.quantity);
            assert_eq!(actual.total_cost_basis, expected.total_cost_basis);
        }
    }
}

proptest! {
    /// Reversing the input order never changes the merged position set.
    #[test]
    fn prop_merge_is_order_independent(
        holdings in proptest::collection::vec(
            proptest::collection::vec((0..3u8, 1..100u32), 1..5),
            1..4,
        )
    ) {
        let converter = usd_converter();
        let instruments = [
            instrument("A:XNAS"),
            instrument("B:XNAS"),
            instrument("C:XNAS"),
        ];

        let snapshots: Vec<PortfolioSnapshot> = holdings
            .iter()
            .enumerate()
            .map(|(i, buys)| {
                let buys: Vec<(&Instrument, Decimal)> = buys
                    .iter()
                    .map(|(idx, qty)| (&instruments[*idx as usize], Decimal::from(*qty)))
                    .collect();
                snapshot_of(&format!("Broker {i}"), &buys, &converter)
            })
            .collect();

        let forward = PortfolioSnapshot::merge(&snapshots, Arc::clone(&converter)).unwrap();
        let mut reversed_input = snapshots;
        reversed_input.reverse();
        let reversed = PortfolioSnapshot::merge(&reversed_input, Arc::clone(&converter)).unwrap();

        prop_assert_eq!(forward.positions().len(), reversed.positions().len());
        for (instrument_id, expected) in forward.positions_by_instrument() {
            let actual = reversed.positions_by_instrument()[instrument_id].clone();
            prop_assert_eq!(actual.quantity, expected.quantity);
            prop_assert_eq!(actual.total_cost_basis, expected.total_cost_basis);
        }
    }
}
