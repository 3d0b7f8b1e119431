//! Budget ownership, period resolution, and progress evaluation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use purse_domain::{Budget, BudgetDraft, BudgetPeriod, PeriodRange, Transaction};

use crate::{
    collection::{remove_by_id, replace_by_id},
    signal::{BudgetExceeded, BudgetSignal},
    storage::{load_collection, save_collection, KeyValueStore, BUDGETS_KEY},
    time::Clock,
    transaction_ledger::SpendingSource,
    CoreError, CoreResult,
};

/// Owns the budget collection and its snapshot under [`BUDGETS_KEY`].
///
/// Spend is never read from a ledger directly: every progress query receives a
/// [`SpendingSource`] from the caller.
pub struct BudgetRegistry {
    budgets: Vec<Budget>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    signal: BudgetSignal,
    last_error: Option<String>,
}

impl BudgetRegistry {
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> CoreResult<Self> {
        let budgets: Vec<Budget> = load_collection(store.as_ref(), BUDGETS_KEY)?;
        debug!(count = budgets.len(), "loaded budgets");
        Ok(Self {
            budgets,
            store,
            clock,
            signal: BudgetSignal::new(),
            last_error: None,
        })
    }

    pub fn add(&mut self, draft: BudgetDraft) -> CoreResult<Budget> {
        let result = self.try_add(draft);
        self.track(result)
    }

    fn try_add(&mut self, draft: BudgetDraft) -> CoreResult<Budget> {
        if !(draft.limit.is_finite() && draft.limit > 0.0) {
            return Err(CoreError::Validation(format!(
                "budget limit must be a positive finite number, got {}",
                draft.limit
            )));
        }
        let budget = Budget::from_draft(draft, self.clock.now());
        debug!(
            id = %budget.id,
            category = %budget.category_id,
            period = %budget.period,
            limit = budget.limit,
            "adding budget"
        );
        self.budgets.push(budget.clone());
        self.persist()?;
        Ok(budget)
    }

    /// Replaces the stored budget with the same id; returns `false` when none matched.
    pub fn update(&mut self, record: Budget) -> CoreResult<bool> {
        let id = record.id;
        if !replace_by_id(&mut self.budgets, record) {
            debug!(%id, "update ignored for unknown budget");
            return Ok(false);
        }
        let result = self.persist();
        self.track(result)?;
        Ok(true)
    }

    pub fn remove(&mut self, id: Uuid) -> CoreResult<Option<Budget>> {
        let removed = remove_by_id(&mut self.budgets, id);
        let result = self.persist();
        self.track(result)?;
        Ok(removed)
    }

    /// Resolves a period label to the calendar window containing `reference`.
    pub fn resolve_period_range(
        &mut self,
        period: &str,
        reference: DateTime<Utc>,
    ) -> CoreResult<PeriodRange> {
        let parsed = period.parse::<BudgetPeriod>().map_err(CoreError::from);
        let period = self.track(parsed)?;
        Ok(period.range_containing(reference))
    }

    /// Window of `period` containing the clock's current instant.
    pub fn current_range(&self, period: BudgetPeriod) -> PeriodRange {
        period.range_containing(self.clock.now())
    }

    /// The matching budget created first; insertion order breaks `createdAt` ties.
    pub fn budget_for(&self, category_id: &str, period: BudgetPeriod) -> Option<&Budget> {
        self.budgets
            .iter()
            .filter(|budget| budget.applies_to(category_id, period))
            .min_by_key(|budget| budget.created_at)
    }

    /// Expense recorded for the category within the current window of `period`.
    pub fn current_spending(
        &self,
        category_id: &str,
        period: BudgetPeriod,
        source: &dyn SpendingSource,
    ) -> f64 {
        let range = self.current_range(period);
        source.spending_for(category_id, Some(range.start), Some(range.end))
    }

    /// Percentage of the budget consumed in the current window; 0 without a budget.
    pub fn progress_for(
        &self,
        category_id: &str,
        period: BudgetPeriod,
        source: &dyn SpendingSource,
    ) -> f64 {
        match self.budget_for(category_id, period) {
            Some(budget) => {
                let spent = self.current_spending(category_id, period, source);
                progress_percent(spent, budget.limit)
            }
            None => 0.0,
        }
    }

    /// Raises [`BudgetExceeded`] when an expense leaves its monthly budget at or above 100%.
    pub fn evaluate(
        &self,
        transaction: &Transaction,
        source: &dyn SpendingSource,
    ) -> Option<BudgetExceeded> {
        if !transaction.is_expense() {
            return None;
        }
        let category_id = transaction.category_id.as_str();
        let budget = self.budget_for(category_id, BudgetPeriod::Monthly)?;
        let spent = self.current_spending(category_id, BudgetPeriod::Monthly, source);
        let progress = progress_percent(spent, budget.limit);
        if progress < 100.0 {
            return None;
        }
        let event = BudgetExceeded {
            category_id: category_id.to_string(),
            budget_id: budget.id,
            transaction_id: transaction.id,
            limit: budget.limit,
            spent,
            progress,
        };
        warn!(
            category = %event.category_id,
            spent = event.spent,
            limit = event.limit,
            progress = event.progress,
            "budget exceeded"
        );
        self.signal.emit(&event);
        Some(event)
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&BudgetExceeded) + Send + Sync + 'static,
    {
        self.signal.subscribe(listener);
    }

    pub fn get(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn persist(&self) -> CoreResult<()> {
        save_collection(self.store.as_ref(), BUDGETS_KEY, &self.budgets)
    }

    fn track<T>(&mut self, result: CoreResult<T>) -> CoreResult<T> {
        if let Err(err) = &result {
            warn!(error = %err, "budget registry operation failed");
            self.last_error = Some(err.to_string());
        }
        result
    }
}

// A limit edited down to zero through `update` counts as exhausted once anything is spent.
fn progress_percent(spent: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        spent * 100.0 / limit
    } else if spent > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}
