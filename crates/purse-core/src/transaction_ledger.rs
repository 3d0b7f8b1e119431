//! Business logic for recording and aggregating transactions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use purse_domain::{
    CategoryCatalog, Transaction, TransactionDraft, TransactionFilter, TransactionKind,
};

use crate::{
    collection::{remove_by_id, replace_by_id},
    storage::{load_collection, save_collection, KeyValueStore, TRANSACTIONS_KEY},
    time::Clock,
    CoreError, CoreResult,
};

/// Aggregation capability consumed by budget evaluation:
/// total expense for a category within optional inclusive bounds.
pub trait SpendingSource {
    fn spending_for(
        &self,
        category_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> f64;
}

impl<F> SpendingSource for F
where
    F: Fn(&str, Option<DateTime<Utc>>, Option<DateTime<Utc>>) -> f64,
{
    fn spending_for(
        &self,
        category_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> f64 {
        self(category_id, start, end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordChange {
    Created,
    Updated,
}

/// Reported by the ledger after a write has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecorded {
    pub transaction: Transaction,
    pub change: RecordChange,
}

/// Owns the transaction collection and its snapshot under [`TRANSACTIONS_KEY`].
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
    catalog: CategoryCatalog,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    last_error: Option<String>,
}

impl TransactionLedger {
    /// Restores the persisted collection once; an absent snapshot starts empty.
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        catalog: CategoryCatalog,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        let transactions: Vec<Transaction> = load_collection(store.as_ref(), TRANSACTIONS_KEY)?;
        debug!(count = transactions.len(), "loaded transactions");
        Ok(Self {
            transactions,
            catalog,
            store,
            clock,
            last_error: None,
        })
    }

    /// Validates and appends a new transaction stamped with the current instant.
    pub fn add(&mut self, draft: TransactionDraft) -> CoreResult<TransactionRecorded> {
        let result = self.try_add(draft);
        self.track(result)
    }

    fn try_add(&mut self, draft: TransactionDraft) -> CoreResult<TransactionRecorded> {
        self.validate(&draft)?;
        let transaction = Transaction::from_draft(draft, self.clock.now());
        debug!(
            id = %transaction.id,
            kind = %transaction.kind,
            category = %transaction.category_id,
            amount = transaction.amount,
            "recording transaction"
        );
        self.transactions.push(transaction.clone());
        self.persist()?;
        Ok(TransactionRecorded {
            transaction,
            change: RecordChange::Created,
        })
    }

    /// Replaces the stored record with the same id. Unknown ids are ignored.
    pub fn update(&mut self, record: Transaction) -> CoreResult<Option<TransactionRecorded>> {
        if !replace_by_id(&mut self.transactions, record.clone()) {
            debug!(id = %record.id, "update ignored for unknown transaction");
            return Ok(None);
        }
        let result = self.persist();
        self.track(result)?;
        Ok(Some(TransactionRecorded {
            transaction: record,
            change: RecordChange::Updated,
        }))
    }

    /// Drops the record with `id`, returning it. Unknown ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> CoreResult<Option<Transaction>> {
        let removed = remove_by_id(&mut self.transactions, id);
        let result = self.persist();
        self.track(result)?;
        Ok(removed)
    }

    /// Income minus expense over every recorded transaction.
    pub fn total_balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn spending_for(
        &self,
        category_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> f64 {
        let filter = TransactionFilter::new()
            .kind(TransactionKind::Expense)
            .category(category_id)
            .between(start, end);
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .map(|txn| txn.amount)
            .sum()
    }

    /// Returns the transactions matching every predicate of `filter`, in insertion order.
    pub fn query(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    pub fn by_category(&self, category_id: &str) -> Vec<&Transaction> {
        self.query(&TransactionFilter::new().category(category_id))
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Message of the most recent failed operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn validate(&self, draft: &TransactionDraft) -> CoreResult<()> {
        if !(draft.amount.is_finite() && draft.amount > 0.0) {
            return Err(CoreError::Validation(format!(
                "amount must be a positive finite number, got {}",
                draft.amount
            )));
        }
        if !self.catalog.admits(draft) {
            return Err(CoreError::Validation(format!(
                "unknown category `{}`",
                draft.category_id
            )));
        }
        Ok(())
    }

    fn persist(&self) -> CoreResult<()> {
        save_collection(self.store.as_ref(), TRANSACTIONS_KEY, &self.transactions)
    }

    fn track<T>(&mut self, result: CoreResult<T>) -> CoreResult<T> {
        if let Err(err) = &result {
            warn!(error = %err, "transaction ledger operation failed");
            self.last_error = Some(err.to_string());
        }
        result
    }
}

impl SpendingSource for TransactionLedger {
    fn spending_for(
        &self,
        category_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> f64 {
        TransactionLedger::spending_for(self, category_id, start, end)
    }
}
