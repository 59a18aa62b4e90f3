//! FX (Foreign Exchange) module - exchange rates and the currency converter.

pub mod currency_converter;
mod fx_errors;
mod fx_model;

pub use currency_converter::CurrencyConverter;
pub use fx_errors::FxError;
pub use fx_model::ExchangeRate;
