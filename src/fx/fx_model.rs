use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A historical exchange rate observation: one unit of `from_currency`
/// is worth `rate` units of `to_currency` on `date`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub date: NaiveDate,
}

impl ExchangeRate {
    pub fn new(
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
        rate: Decimal,
        date: NaiveDate,
    ) -> Self {
        ExchangeRate {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            rate,
            date,
        }
    }
}
