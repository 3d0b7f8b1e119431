//! purse-core
//!
//! Ledger and budget services for Purse.
//! Depends on purse-domain. Persistence goes through the [`KeyValueStore`] seam only.

pub mod budget_registry;
mod collection;
pub mod error;
pub mod signal;
pub mod storage;
pub mod time;
pub mod tracker;
pub mod transaction_ledger;

pub use budget_registry::*;
pub use error::{CoreError, CoreResult};
pub use signal::*;
pub use storage::{KeyValueStore, MemoryStore, BUDGETS_KEY, TRANSACTIONS_KEY};
pub use time::*;
pub use tracker::Tracker;
pub use transaction_ledger::*;
