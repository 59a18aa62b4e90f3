//! Folio Core - point-in-time portfolio valuation snapshots.
//!
//! This crate computes immutable valuation snapshots from transaction
//! history: holdings as of a date, priced from historical quotes,
//! converted into a reporting currency, and mergeable across portfolios.
//! It is a pure in-process computation library; it does not fetch data
//! and does not persist anything.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod grouping;
pub mod ledger;
pub mod money;
pub mod positions;
pub mod quotes;
pub mod snapshot;
pub mod taxonomies;

// Re-export the primary domain types
pub use snapshot::*;
pub use positions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
