use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const CONFIG_FILE: &str = "config.json";

/// Reads and writes one `config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `<base>/config.json`, creating `base` if needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// A missing file yields [`Config::default`]; fields absent from the file take their defaults.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.config_path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&data).map_err(|err| self.malformed(err))
    }

    /// Writes pretty JSON to a sibling `.tmp` file, then renames it over the config.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config).map_err(|err| self.malformed(err))?;
        let staging = self.config_path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.config_path)?;
        Ok(())
    }

    fn malformed(&self, err: serde_json::Error) -> ConfigError {
        ConfigError::Malformed {
            path: self.config_path.clone(),
            message: err.to_string(),
        }
    }
}
