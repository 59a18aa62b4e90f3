use std::sync::Arc;

use crate::errors::Result;
use crate::ledger::{ReferenceAccount, Transaction};

/// Shared handle to a transaction ledger, as held by a snapshot.
pub type LedgerRef = Arc<dyn TransactionLedgerTrait>;

/// A portfolio seen as an ordered transaction ledger.
///
/// Two implementations exist: [`Portfolio`](crate::ledger::Portfolio),
/// which is editable, and [`JointPortfolio`](crate::ledger::JointPortfolio),
/// the read-only aggregate produced by a snapshot merge whose mutating
/// operations always fail. Capability restriction lives in the trait
/// implementation, not in runtime flags.
pub trait TransactionLedgerTrait: Send + Sync {
    fn name(&self) -> &str;

    /// The account the portfolio settles against, if any. Carries the
    /// portfolio's reporting currency.
    fn reference_account(&self) -> Option<&ReferenceAccount>;

    /// All transactions, in insertion order.
    fn transactions(&self) -> &[Transaction];

    /// Removes a single transaction without touching anything else.
    fn shallow_delete_transaction(&mut self, transaction_id: &str) -> Result<()>;

    /// Removes a transaction together with its dependent bookings.
    fn delete_transaction(&mut self, transaction_id: &str) -> Result<()>;
}
