//! Spending caps applied to a category over a calendar period.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A spending guardrail for a specific category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub category_id: String,
    pub limit: f64,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Budget {
    pub fn from_draft(draft: BudgetDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id: draft.category_id,
            limit: draft.limit,
            period: draft.period,
            created_at,
            currency: draft.currency,
        }
    }

    pub fn applies_to(&self, category_id: &str, period: BudgetPeriod) -> bool {
        self.category_id == category_id && self.period == period
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToCategory for Budget {
    fn category_id(&self) -> &str {
        &self.category_id
    }
}

/// Caller-supplied fields of a budget; the registry assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDraft {
    pub category_id: String,
    pub limit: f64,
    pub period: BudgetPeriod,
    pub currency: Option<String>,
}

impl BelongsToCategory for BudgetDraft {
    fn category_id(&self) -> &str {
        &self.category_id
    }
}

impl BudgetDraft {
    pub fn new(category_id: impl Into<String>, limit: f64, period: BudgetPeriod) -> Self {
        Self {
            category_id: category_id.into(),
            limit,
            period,
            currency: None,
        }
    }

    pub fn monthly(category_id: impl Into<String>, limit: f64) -> Self {
        Self::new(category_id, limit, BudgetPeriod::Monthly)
    }

    pub fn weekly(category_id: impl Into<String>, limit: f64) -> Self {
        Self::new(category_id, limit, BudgetPeriod::Weekly)
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}
