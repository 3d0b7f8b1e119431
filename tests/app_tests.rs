mod common;

use std::{
    fs,
    sync::{Arc, Mutex},
};

use chrono::{TimeZone, Utc};
use common::{isolated_config, scratch_dir};
use purse::{open_tracker, App, AppError};
use purse_config::{Config, ConfigManager};
use purse_core::{CoreError, ManualClock, MemoryStore, BUDGETS_KEY};
use purse_domain::{BudgetDraft, BudgetPeriod, CategoryCatalog, TransactionDraft};

#[test]
fn open_tracker_persists_between_sessions() {
    let dir = scratch_dir();

    let mut tracker = open_tracker(&dir).expect("open tracker");
    tracker
        .add_transaction(TransactionDraft::income(1_000.0, "food"))
        .unwrap();
    tracker
        .add_transaction(TransactionDraft::expense(120.0, "transport"))
        .unwrap();
    tracker.add_budget(BudgetDraft::monthly("food", 300.0)).unwrap();
    drop(tracker);

    let reopened = open_tracker(&dir).expect("reopen tracker");
    assert_eq!(reopened.ledger().len(), 2);
    assert_eq!(reopened.total_balance(), 880.0);
    assert!(reopened.budget_for("food", BudgetPeriod::Monthly).is_some());
    assert!(dir.join("transactions.json").exists());
    assert!(dir.join("budgets.json").exists());
}

#[test]
fn app_opens_the_configured_data_dir() {
    let config = isolated_config();
    let data_dir = config.data_dir.clone().expect("data dir");

    let mut app = App::open(config).expect("open app");
    app.tracker_mut()
        .add_transaction(TransactionDraft::expense(9.5, "food"))
        .unwrap();

    assert!(data_dir.join("transactions.json").exists());
}

#[test]
fn app_stamps_default_currency_onto_budgets() {
    let config = Config {
        default_currency: Some("EUR".into()),
        ..isolated_config()
    };
    let mut app = App::open(config).expect("open app");

    let stamped = app.add_budget(BudgetDraft::monthly("food", 200.0)).unwrap();
    let explicit = app
        .add_budget(BudgetDraft::weekly("transport", 40.0).with_currency("USD"))
        .unwrap();

    assert_eq!(stamped.currency.as_deref(), Some("EUR"));
    assert_eq!(explicit.currency.as_deref(), Some("USD"));
}

#[test]
fn app_signals_exceeded_budget_through_injected_collaborators() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 3, 13, 12, 0, 0).unwrap(),
    ));
    let store = Arc::new(MemoryStore::new());
    let mut app = App::open_with(
        Config::default(),
        store.clone(),
        CategoryCatalog::default(),
        clock,
    )
    .expect("open app");

    let alerts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&alerts);
    app.tracker_mut()
        .subscribe(move |event| sink.lock().unwrap().push(event.progress));

    app.add_budget(BudgetDraft::monthly("food", 50.0)).unwrap();
    app.tracker_mut()
        .add_transaction(TransactionDraft::expense(30.0, "food"))
        .unwrap();
    app.tracker_mut()
        .add_transaction(TransactionDraft::expense(25.0, "food"))
        .unwrap();

    assert_eq!(*alerts.lock().unwrap(), vec![110.0]);
    assert!(store.raw(BUDGETS_KEY).is_some());
}

#[test]
fn corrupt_snapshot_fails_to_open() {
    let dir = scratch_dir();
    fs::write(dir.join("transactions.json"), "{ definitely not an array").unwrap();

    let err = open_tracker(&dir).err().expect("corrupt snapshot must fail");
    assert!(
        matches!(err, AppError::Core(CoreError::Serde(_))),
        "unexpected error: {err:?}"
    );
}

#[test]
fn validation_errors_surface_through_app_error() {
    let mut app = App::open(isolated_config()).expect("open app");

    let err = app
        .add_budget(BudgetDraft::monthly("food", -1.0))
        .expect_err("negative limit");
    assert!(matches!(err, AppError::Core(CoreError::Validation(_))));
    assert!(app.tracker().registry().last_error().is_some());
}

#[test]
fn config_saved_next_to_data_is_honoured() {
    let base = scratch_dir();
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let config = Config {
        data_dir: Some(base.join("ledger")),
        log_filter: "purse=debug".into(),
        default_currency: Some("GBP".into()),
    };
    manager.save(&config).unwrap();

    let loaded = manager.load().unwrap();
    let mut app = App::open(loaded).expect("open app");
    let budget = app.add_budget(BudgetDraft::monthly("food", 10.0)).unwrap();

    assert_eq!(app.config().log_filter, "purse=debug");
    assert_eq!(budget.currency.as_deref(), Some("GBP"));
    assert!(base.join("ledger").join("budgets.json").exists());
}
