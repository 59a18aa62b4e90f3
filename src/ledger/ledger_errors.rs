use thiserror::Error;

/// Errors raised by ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Structural mutation attempted on a read-only aggregate portfolio.
    #[error("Unsupported operation on read-only portfolio: {0}")]
    UnsupportedOperation(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
}
