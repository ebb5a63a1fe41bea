//! The transaction model and the in-memory store that holds the customer's transactions.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::Error;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The identifier the billing backend assigns to a transaction, e.g. "TXN123456".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap a transaction ID string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The outcome of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// The payment went through.
    Success,
    /// The payment is still being processed.
    Pending,
    /// The payment was declined or cancelled.
    Failed,
}

impl TransactionStatus {
    /// The lowercase name used in fixtures and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A billing event, such as buying a data package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique within a [TransactionStore].
    pub id: TransactionId,
    /// Free text shown in the history table.
    pub description: String,
    /// The day the transaction was made.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The amount in rupiah.
    pub amount: u64,
    /// Whether the payment succeeded.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Create a transaction.
    pub fn new(
        id: &str,
        description: &str,
        date: Date,
        amount: u64,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: TransactionId::new(id),
            description: description.to_owned(),
            date,
            amount,
            status,
        }
    }
}

/// The customer's transactions, in the order the backend returned them.
///
/// The store is read-only once created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create a store from `transactions`, keeping their order.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTransactionId] if two transactions share an ID.
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, Error> {
        let mut seen = HashSet::with_capacity(transactions.len());

        for transaction in &transactions {
            if !seen.insert(&transaction.id) {
                return Err(Error::DuplicateTransactionId(transaction.id.to_string()));
            }
        }

        Ok(Self { transactions })
    }

    /// Load a store from a JSON array of transactions.
    ///
    /// # Errors
    /// Returns [Error::InvalidFixture] if the JSON does not describe a list of
    /// transactions, or [Error::DuplicateTransactionId] if IDs repeat.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let transactions: Vec<Transaction> =
            serde_json::from_str(json).map_err(|error| Error::InvalidFixture(error.to_string()))?;

        Self::new(transactions)
    }

    /// The sample transactions shown when no fixture file is given.
    pub fn sample() -> Self {
        use TransactionStatus::*;

        Self {
            transactions: vec![
                Transaction::new(
                    "TXN123456",
                    "50GB Data Package",
                    date!(2025-10-15),
                    150_000,
                    Success,
                ),
                Transaction::new(
                    "TXN123457",
                    "15GB Data Package",
                    date!(2025-10-10),
                    100_000,
                    Success,
                ),
                Transaction::new(
                    "TXN123458",
                    "5GB Data Package",
                    date!(2025-07-05),
                    50_000,
                    Pending,
                ),
                Transaction::new(
                    "TXN123459",
                    "30GB Data Package",
                    date!(2025-07-28),
                    150_000,
                    Success,
                ),
                Transaction::new(
                    "TXN123460",
                    "15GB Data Package",
                    date!(2025-05-20),
                    100_000,
                    Failed,
                ),
                Transaction::new(
                    "TXN123461",
                    "5GB Data Package",
                    date!(2025-05-15),
                    50_000,
                    Success,
                ),
                Transaction::new(
                    "TXN123462",
                    "50GB Data Package",
                    date!(2025-05-10),
                    150_000,
                    Success,
                ),
                Transaction::new(
                    "TXN123463",
                    "15GB Data Package",
                    date!(2025-05-05),
                    100_000,
                    Success,
                ),
            ],
        }
    }

    /// All transactions in store order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The first `count` transactions in store order.
    pub fn recent(&self, count: usize) -> &[Transaction] {
        &self.transactions[..count.min(self.transactions.len())]
    }

    /// The number of transactions in the store.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
