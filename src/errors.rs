//! Core error types for the snapshot library.
//!
//! Module-level errors (fx, ledger, calculation) are defined next to the
//! code that raises them and converted into the root [`Error`] here.

use thiserror::Error;

use crate::fx::FxError;
use crate::ledger::LedgerError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the snapshot library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Snapshot calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Currency mismatch: cannot add {actual} into a {expected} total without conversion")]
    CurrencyMismatch { expected: String, actual: String },

    #[error("Input validation failed: {0}")]
    Validation(String),
}

/// Errors that occur during snapshot construction and merging.
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// `merge` was called with an empty snapshot list. This is a
    /// caller-contract violation, never a degenerate empty result.
    #[error("snapshots to be merged must not be empty")]
    EmptyMergeInput,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
