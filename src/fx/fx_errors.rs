use thiserror::Error;

/// Errors raised by exchange-rate lookup and conversion.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),
}
