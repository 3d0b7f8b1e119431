//! Coordinator that owns one ledger and one registry and forwards
//! recorded transactions into budget evaluation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use purse_domain::{
    Budget, BudgetDraft, BudgetPeriod, CategoryCatalog, Transaction, TransactionDraft,
    TransactionFilter,
};

use crate::{
    budget_registry::BudgetRegistry,
    signal::BudgetExceeded,
    storage::KeyValueStore,
    time::Clock,
    transaction_ledger::{TransactionLedger, TransactionRecorded},
    CoreResult,
};

pub struct Tracker {
    ledger: TransactionLedger,
    registry: BudgetRegistry,
}

impl Tracker {
    /// Loads both collections from `store`, sharing one clock between them.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        catalog: CategoryCatalog,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        let ledger = TransactionLedger::load(Arc::clone(&store), catalog, Arc::clone(&clock))?;
        let registry = BudgetRegistry::load(store, clock)?;
        info!(
            transactions = ledger.len(),
            budgets = registry.len(),
            "tracker opened"
        );
        Ok(Self::from_parts(ledger, registry))
    }

    pub fn from_parts(ledger: TransactionLedger, registry: BudgetRegistry) -> Self {
        Self { ledger, registry }
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn registry(&self) -> &BudgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BudgetRegistry {
        &mut self.registry
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&BudgetExceeded) + Send + Sync + 'static,
    {
        self.registry.subscribe(listener);
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> CoreResult<Transaction> {
        let recorded = self.ledger.add(draft)?;
        Ok(self.on_recorded(recorded))
    }

    /// Returns `false` when no transaction carries the record's id.
    pub fn update_transaction(&mut self, record: Transaction) -> CoreResult<bool> {
        match self.ledger.update(record)? {
            Some(recorded) => {
                self.on_recorded(recorded);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> CoreResult<Option<Transaction>> {
        self.ledger.remove(id)
    }

    pub fn add_budget(&mut self, draft: BudgetDraft) -> CoreResult<Budget> {
        if !self.ledger.catalog().admits(&draft) {
            warn!(category = %draft.category_id, "budget references a category outside the catalog");
        }
        self.registry.add(draft)
    }

    pub fn update_budget(&mut self, record: Budget) -> CoreResult<bool> {
        self.registry.update(record)
    }

    pub fn remove_budget(&mut self, id: Uuid) -> CoreResult<Option<Budget>> {
        self.registry.remove(id)
    }

    pub fn total_balance(&self) -> f64 {
        self.ledger.total_balance()
    }

    pub fn spending_for(
        &self,
        category_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> f64 {
        self.ledger.spending_for(category_id, start, end)
    }

    pub fn query(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.ledger.query(filter)
    }

    pub fn budget_for(&self, category_id: &str, period: BudgetPeriod) -> Option<&Budget> {
        self.registry.budget_for(category_id, period)
    }

    pub fn current_spending(&self, category_id: &str, period: BudgetPeriod) -> f64 {
        self.registry
            .current_spending(category_id, period, &self.ledger)
    }

    pub fn progress_for(&self, category_id: &str, period: BudgetPeriod) -> f64 {
        self.registry.progress_for(category_id, period, &self.ledger)
    }

    fn on_recorded(&self, recorded: TransactionRecorded) -> Transaction {
        self.registry.evaluate(&recorded.transaction, &self.ledger);
        recorded.transaction
    }
}
