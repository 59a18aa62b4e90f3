use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::ExchangeRate;
use crate::money::Money;

/// A currency converter bound to a term (reporting) currency.
///
/// Rates are stored as independent time-series per pair and paths are
/// calculated on demand with a breadth-first search over the pair graph,
/// so EUR -> CHF works through USD when no direct series exists. Date
/// lookup is nearest-neighbor: the closest observation on either side of
/// the requested date wins, with ties going to the past.
pub struct CurrencyConverter {
    /// The reporting currency all conversions target.
    term_currency: String,

    /// Graph adjacency list: currency -> set of connected currencies.
    adj: HashMap<String, HashSet<String>>,

    /// Rate data per (from, to) pair, keyed by observation date.
    rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>>,
}

impl CurrencyConverter {
    /// Creates a converter targeting `term_currency`, seeded with
    /// historical rates.
    pub fn new(term_currency: impl Into<String>, exchange_rates: Vec<ExchangeRate>) -> Self {
        let mut converter = CurrencyConverter {
            term_currency: term_currency.into(),
            adj: HashMap::new(),
            rates: HashMap::new(),
        };
        converter.add_historical_rates(exchange_rates);
        converter
    }

    /// The reporting currency this converter targets.
    pub fn term_currency(&self) -> &str {
        &self.term_currency
    }

    /// Adds historical FX rates. Inverses and graph connectivity are
    /// handled automatically.
    pub fn add_historical_rates(&mut self, rates: Vec<ExchangeRate>) {
        for rate in rates {
            if rate.from_currency == rate.to_currency {
                continue;
            }

            let forward_pair = (rate.from_currency.clone(), rate.to_currency.clone());
            let inverse_pair = (rate.to_currency.clone(), rate.from_currency.clone());

            self.rates
                .entry(forward_pair)
                .or_default()
                .insert(rate.date, rate.rate);
            self.adj
                .entry(rate.from_currency.clone())
                .or_default()
                .insert(rate.to_currency.clone());

            if !rate.rate.is_zero() {
                self.rates
                    .entry(inverse_pair)
                    .or_default()
                    .insert(rate.date, Decimal::ONE / rate.rate);
                self.adj
                    .entry(rate.to_currency)
                    .or_default()
                    .insert(rate.from_currency);
            }
        }
    }

    /// Finds the direct rate between two connected currencies by
    /// nearest-neighbor lookup around `date`.
    fn get_direct_rate(&self, from: &str, to: &str, date: NaiveDate) -> Option<Decimal> {
        let key = (from.to_string(), to.to_string());
        let history = self.rates.get(&key)?;

        let prev = history.range(..=date).next_back();
        let next = history.range(date..).next();

        match (prev, next) {
            (Some((d1, r1)), Some((d2, r2))) => {
                if d1 == d2 {
                    return Some(*r1);
                }
                let dist_prev = (date - *d1).num_days().abs();
                let dist_next = (*d2 - date).num_days().abs();
                if dist_prev <= dist_next {
                    Some(*r1)
                } else {
                    Some(*r2)
                }
            }
            (Some((_, r)), None) => Some(*r),
            (None, Some((_, r))) => Some(*r),
            (None, None) => None,
        }
    }

    /// Converts an amount between arbitrary currencies as of `date`,
    /// walking the pair graph breadth-first for the shortest path.
    pub fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if from_currency == to_currency {
            return Ok(amount);
        }

        // BFS state: (current currency, accumulated rate)
        let mut queue: VecDeque<(String, Decimal)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();

        queue.push_back((from_currency.to_string(), Decimal::ONE));
        visited.insert(from_currency.to_string());

        while let Some((current_curr, current_rate)) = queue.pop_front() {
            if current_curr == to_currency {
                return Ok(amount * current_rate);
            }

            if let Some(neighbors) = self.adj.get(&current_curr) {
                for neighbor in neighbors {
                    if !visited.contains(neighbor) {
                        if let Some(rate) = self.get_direct_rate(&current_curr, neighbor, date) {
                            visited.insert(neighbor.clone());
                            queue.push_back((neighbor.clone(), current_rate * rate));
                        }
                    }
                }
            }
        }

        Err(FxError::RateNotFound(format!(
            "No conversion path found for {} -> {} on or near {}",
            from_currency, to_currency, date
        )))
    }

    /// The multiplier taking one unit of `from_currency` into the term
    /// currency as of `date`.
    pub fn rate_at(&self, from_currency: &str, date: NaiveDate) -> Result<Decimal, FxError> {
        self.convert_amount(Decimal::ONE, from_currency, &self.term_currency, date)
    }

    /// Converts a money value into the term currency as of `date`.
    pub fn convert(&self, money: &Money, date: NaiveDate) -> Result<Money, FxError> {
        let amount =
            self.convert_amount(money.amount(), money.currency(), &self.term_currency, date)?;
        Ok(Money::new(amount, self.term_currency.clone()))
    }
}
