//! Composition root: builds the store, clock, and catalog a [`Tracker`] runs on.

use std::{path::Path, sync::Arc};

use tracing::info;

use purse_config::{Config, ConfigManager};
use purse_core::{Clock, KeyValueStore, SystemClock, Tracker};
use purse_domain::{Budget, BudgetDraft, CategoryCatalog};
use purse_storage_json::JsonFileStore;

use crate::AppResult;

/// Opens a tracker persisted as JSON files under `data_dir`, on the system clock
/// and the default category catalog.
pub fn open_tracker(data_dir: &Path) -> AppResult<Tracker> {
    let store = JsonFileStore::new(data_dir.to_path_buf())?;
    let tracker = Tracker::open(
        Arc::new(store),
        CategoryCatalog::default(),
        Arc::new(SystemClock),
    )?;
    Ok(tracker)
}

/// A configured tracker session.
pub struct App {
    tracker: Tracker,
    config: Config,
}

impl App {
    /// Loads `config.json` from the default data directory and opens the tracker it names.
    pub fn from_env() -> AppResult<Self> {
        let manager = ConfigManager::with_base_dir(Config::default().resolve_data_dir())?;
        let config = manager.load()?;
        Self::open(config)
    }

    pub fn open(config: Config) -> AppResult<Self> {
        crate::init_with_filter(&config.log_filter);
        let data_dir = config.resolve_data_dir();
        info!(path = %data_dir.display(), "opening purse data directory");
        let tracker = open_tracker(&data_dir)?;
        Ok(Self { tracker, config })
    }

    /// Opens against caller-supplied collaborators instead of the filesystem and system clock.
    pub fn open_with(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        catalog: CategoryCatalog,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let tracker = Tracker::open(store, catalog, clock)?;
        Ok(Self { tracker, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }

    /// Adds a budget, filling in the configured default currency when the draft has none.
    pub fn add_budget(&mut self, mut draft: BudgetDraft) -> AppResult<Budget> {
        if draft.currency.is_none() {
            draft.currency = self.config.default_currency.clone();
        }
        Ok(self.tracker.add_budget(draft)?)
    }

    pub fn into_tracker(self) -> Tracker {
        self.tracker
    }
}
