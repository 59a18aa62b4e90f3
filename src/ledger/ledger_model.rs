use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Result;
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_traits::TransactionLedgerTrait;

/// A tradable instrument in the shared catalog.
///
/// Identity is the `id`; two instruments with equal symbols or names
/// are still distinct holdings. Positions and taxonomy assignments
/// reference instruments by id only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Native currency quotes and valuations are denominated in.
    pub currency: String,
}

impl Instrument {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Instrument {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            currency: currency.into(),
        }
    }
}

/// Direction of a portfolio transaction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// A single dated buy or sell of an instrument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub instrument_id: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    /// Number of shares moved; always positive, direction comes from `kind`.
    pub quantity: Decimal,
    /// Price per share in `currency`.
    pub unit_price: Decimal,
    pub fee: Decimal,
    /// Currency of `unit_price` and `fee`; the instrument's native currency.
    pub currency: String,
}

impl Transaction {
    pub fn new(
        instrument: &Instrument,
        kind: TransactionKind,
        date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
        fee: Decimal,
    ) -> Self {
        Transaction {
            id: Uuid::new_v4().to_string(),
            instrument_id: instrument.id.clone(),
            kind,
            date,
            quantity,
            unit_price,
            fee,
            currency: instrument.currency.clone(),
        }
    }

    /// Net share delta of this transaction: positive for buys,
    /// negative for sells.
    pub fn signed_quantity(&self) -> Decimal {
        match self.kind {
            TransactionKind::Buy => self.quantity,
            TransactionKind::Sell => -self.quantity,
        }
    }
}

/// The account a portfolio settles trades against. Carries the
/// portfolio's reporting currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAccount {
    pub id: String,
    pub name: String,
    pub currency: String,
}

impl ReferenceAccount {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        ReferenceAccount {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            currency: currency.into(),
        }
    }
}

/// An editable portfolio: an ordered ledger of transactions.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    id: String,
    name: String,
    reference_account: Option<ReferenceAccount>,
    transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        Portfolio {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            reference_account: None,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_reference_account(&mut self, account: ReferenceAccount) {
        self.reference_account = Some(account);
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn add_all_transactions(&mut self, transactions: &[Transaction]) {
        self.transactions.extend_from_slice(transactions);
    }

    fn remove_transaction(&mut self, transaction_id: &str) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != transaction_id);
        if self.transactions.len() == before {
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()).into());
        }
        Ok(())
    }
}

impl TransactionLedgerTrait for Portfolio {
    fn name(&self) -> &str {
        &self.name
    }

    fn reference_account(&self) -> Option<&ReferenceAccount> {
        self.reference_account.as_ref()
    }

    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn shallow_delete_transaction(&mut self, transaction_id: &str) -> Result<()> {
        self.remove_transaction(transaction_id)
    }

    fn delete_transaction(&mut self, transaction_id: &str) -> Result<()> {
        // Transactions carry no dependent bookings in this model, so a
        // full delete removes exactly the one entry.
        self.remove_transaction(transaction_id)
    }
}

/// Synthetic portfolio produced by merging snapshots: the union of the
/// source portfolios' transactions behind a read-only surface.
///
/// Deleting a transaction from a joint portfolio is not a meaningful
/// operation; both delete variants fail with
/// [`LedgerError::UnsupportedOperation`] instead of silently corrupting
/// the aggregate.
#[derive(Debug, Clone)]
pub struct JointPortfolio {
    inner: Portfolio,
}

impl JointPortfolio {
    pub fn new(label: impl Into<String>, term_currency: impl Into<String>) -> Self {
        let label = label.into();
        let mut inner = Portfolio::new(label.clone());
        inner.set_reference_account(ReferenceAccount::new(label, term_currency));
        JointPortfolio { inner }
    }

    /// Appends source transactions into the aggregate. Used only while
    /// the merge assembles the joint view.
    pub fn add_all_transactions(&mut self, transactions: &[Transaction]) {
        self.inner.add_all_transactions(transactions);
    }
}

impl TransactionLedgerTrait for JointPortfolio {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn reference_account(&self) -> Option<&ReferenceAccount> {
        self.inner.reference_account()
    }

    fn transactions(&self) -> &[Transaction] {
        self.inner.transactions()
    }

    fn shallow_delete_transaction(&mut self, _transaction_id: &str) -> Result<()> {
        Err(LedgerError::UnsupportedOperation(
            "shallow_delete_transaction on a joint portfolio".to_string(),
        )
        .into())
    }

    fn delete_transaction(&mut self, _transaction_id: &str) -> Result<()> {
        Err(LedgerError::UnsupportedOperation(
            "delete_transaction on a joint portfolio".to_string(),
        )
        .into())
    }
}
