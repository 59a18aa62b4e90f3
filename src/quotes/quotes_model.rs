use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::PriceSourceTrait;

/// A single historical price observation for an instrument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub instrument_id: String,
    pub date: NaiveDate,
    pub close: Decimal,
}

/// In-memory price history with "latest quote on or before date"
/// lookup semantics.
#[derive(Debug, Clone, Default)]
pub struct HistoricalPrices {
    prices: HashMap<String, BTreeMap<NaiveDate, Decimal>>,
}

impl HistoricalPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        let mut prices = HistoricalPrices::new();
        for quote in quotes {
            prices.add_quote(&quote.instrument_id, quote.date, quote.close);
        }
        prices
    }

    /// Records a price observation. A second observation for the same
    /// instrument and date replaces the first.
    pub fn add_quote(&mut self, instrument_id: &str, date: NaiveDate, close: Decimal) {
        self.prices
            .entry(instrument_id.to_string())
            .or_default()
            .insert(date, close);
    }
}

impl PriceSourceTrait for HistoricalPrices {
    fn price_of(&self, instrument_id: &str, date: NaiveDate) -> Option<Decimal> {
        self.prices
            .get(instrument_id)?
            .range(..=date)
            .next_back()
            .map(|(_, price)| *price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_latest_quote_on_or_before_date() {
        let prices = HistoricalPrices::from_quotes(vec![
            Quote {
                instrument_id: "AAPL".to_string(),
                date: date(2024, 1, 2),
                close: dec!(185),
            },
            Quote {
                instrument_id: "AAPL".to_string(),
                date: date(2024, 1, 9),
                close: dec!(190),
            },
        ]);

        // Exact match
        assert_eq!(prices.price_of("AAPL", date(2024, 1, 9)), Some(dec!(190)));
        // In between: most recent earlier observation
        assert_eq!(prices.price_of("AAPL", date(2024, 1, 5)), Some(dec!(185)));
        // After the last observation
        assert_eq!(prices.price_of("AAPL", date(2024, 6, 1)), Some(dec!(190)));
    }

    #[test]
    fn test_no_price_before_first_observation() {
        let mut prices = HistoricalPrices::new();
        prices.add_quote("AAPL", date(2024, 1, 2), dec!(185));

        assert_eq!(prices.price_of("AAPL", date(2023, 12, 31)), None);
    }

    #[test]
    fn test_unknown_instrument_has_no_price() {
        let prices = HistoricalPrices::new();
        assert_eq!(prices.price_of("MSFT", date(2024, 1, 1)), None);
    }
}
