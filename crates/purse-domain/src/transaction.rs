//! Domain models for ledger transactions and transaction queries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category_id: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Materializes a draft with a fresh identifier and the supplied timestamp.
    pub fn from_draft(draft: TransactionDraft, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            amount: draft.amount,
            category_id: draft.category_id,
            date,
            description: draft.description,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Contribution of this entry to the running balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToCategory for Transaction {
    fn category_id(&self) -> &str {
        &self.category_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of money movement.
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// Caller-supplied fields of a transaction; the ledger assigns `id` and `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category_id: String,
    pub description: Option<String>,
}

impl BelongsToCategory for TransactionDraft {
    fn category_id(&self) -> &str {
        &self.category_id
    }
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, amount: f64, category_id: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            category_id: category_id.into(),
            description: None,
        }
    }

    pub fn income(amount: f64, category_id: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, category_id)
    }

    pub fn expense(amount: f64, category_id: impl Into<String>) -> Self {
        Self::new(TransactionKind::Expense, amount, category_id)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Conjunctive filter; `None` fields match every transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn between(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.kind.map_or(true, |kind| transaction.kind == kind)
            && self
                .category_id
                .as_deref()
                .map_or(true, |category| transaction.category_id == category)
            && within_bounds(transaction.date, self.start, self.end)
    }
}
