//! One-way notification raised when spending reaches a budget's limit.

use std::fmt;

use uuid::Uuid;

/// Emitted when an expense pushes monthly progress for its category to 100% or more.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetExceeded {
    pub category_id: String,
    pub budget_id: Uuid,
    pub transaction_id: Uuid,
    pub limit: f64,
    pub spent: f64,
    pub progress: f64,
}

pub type BudgetListener = Box<dyn Fn(&BudgetExceeded) + Send + Sync>;

/// Fan-out of [`BudgetExceeded`] events to registered listeners, in subscription order.
#[derive(Default)]
pub struct BudgetSignal {
    listeners: Vec<BudgetListener>,
}

impl BudgetSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&BudgetExceeded) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&self, event: &BudgetExceeded) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for BudgetSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetSignal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn event() -> BudgetExceeded {
        BudgetExceeded {
            category_id: "food".into(),
            budget_id: Uuid::new_v4(),
            transaction_id: Uuid::new_v4(),
            limit: 50.0,
            spent: 55.0,
            progress: 110.0,
        }
    }

    #[test]
    fn delivers_to_every_listener_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut signal = BudgetSignal::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            signal.subscribe(move |event| {
                seen.lock().unwrap().push(format!("{tag}:{}", event.category_id));
            });
        }
        signal.emit(&event());
        assert_eq!(*seen.lock().unwrap(), ["first:food", "second:food"]);
        assert_eq!(signal.listener_count(), 2);
    }

    #[test]
    fn emitting_without_listeners_is_a_no_op() {
        BudgetSignal::new().emit(&event());
    }
}
