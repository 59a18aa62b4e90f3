use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Historical price lookup, consumed once per instrument per snapshot
/// build.
///
/// `None` means no price is known for the instrument anywhere on or
/// before the date; the snapshot builder treats that as an explicit
/// "unknown price" marker rather than an error.
pub trait PriceSourceTrait: Send + Sync {
    /// Price of one unit of the instrument, in its native currency,
    /// as of `date`.
    fn price_of(&self, instrument_id: &str, date: NaiveDate) -> Option<Decimal>;
}
