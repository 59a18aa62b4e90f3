//! Ledger module - instruments, transactions, and the portfolio
//! abstraction consumed by the snapshot builder.

mod ledger_errors;
mod ledger_model;
mod ledger_traits;

pub use ledger_errors::LedgerError;
pub use ledger_model::{
    Instrument, JointPortfolio, Portfolio, ReferenceAccount, Transaction, TransactionKind,
};
pub use ledger_traits::{LedgerRef, TransactionLedgerTrait};
