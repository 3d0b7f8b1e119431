#![doc(test(attr(deny(warnings))))]

//! Purse records income and expense transactions, tracks per-category budgets,
//! and signals when an expense pushes a monthly budget past its limit.

pub mod app;
pub mod errors;
pub mod utils;

pub use app::{open_tracker, App};
pub use errors::{AppError, AppResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(&purse_config::Config::default_log_filter());
}

/// Like [`init`], but falls back to `directive` when `RUST_LOG` is unset.
pub fn init_with_filter(directive: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Purse tracing initialized.");
    });
}
