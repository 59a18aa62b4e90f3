//! Quotes module - historical price lookup boundary.

mod quotes_model;
mod quotes_traits;

pub use quotes_model::{HistoricalPrices, Quote};
pub use quotes_traits::PriceSourceTrait;
