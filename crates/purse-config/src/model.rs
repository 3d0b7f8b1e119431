use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

/// Environment variable that overrides the data directory when the config leaves it unset.
pub const HOME_ENV: &str = "PURSE_HOME";
const DEFAULT_DIR_NAME: &str = "purse";

/// Stores user-configurable preferences for a Purse installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the `transactions` and `budgets` snapshots.
    pub data_dir: Option<PathBuf>,

    /// `tracing_subscriber::EnvFilter` directive applied when `RUST_LOG` is absent.
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,

    /// Informational currency stamped onto new budgets that do not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_filter: Self::default_log_filter(),
            default_currency: None,
        }
    }
}

impl Config {
    pub fn default_log_filter() -> String {
        "purse=info".into()
    }

    /// Explicit `data_dir`, then `$PURSE_HOME`, then the platform data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }
}
