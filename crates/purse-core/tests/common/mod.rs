#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use purse_core::{BudgetExceeded, ManualClock, MemoryStore, Tracker};
use purse_domain::CategoryCatalog;

pub fn mid_march() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 13, 12, 0, 0).unwrap()
}

/// Tracker over an in-memory store plus a log of every budget-exceeded event.
pub struct Harness {
    pub tracker: Tracker,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub alerts: Arc<Mutex<Vec<BudgetExceeded>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), mid_march())
    }

    pub fn with_store(store: Arc<MemoryStore>, now: DateTime<Utc>) -> Self {
        let clock = Arc::new(ManualClock::new(now));
        let mut tracker = Tracker::open(store.clone(), CategoryCatalog::default(), clock.clone())
            .expect("open tracker");
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&alerts);
        tracker.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        Self {
            tracker,
            store,
            clock,
            alerts,
        }
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}
