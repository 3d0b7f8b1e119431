//! purse-storage-json
//!
//! Filesystem-backed [`KeyValueStore`]: every key is one JSON document under a root directory.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use purse_core::{CoreError, KeyValueStore};
use tracing::debug;

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each key as `<root>/<key>.json`, replacing files atomically on write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let staged = staging_path(&path);
        write_staged(&staged, value)?;
        fs::rename(&staged, &path)?;
        debug!(key, path = %path.display(), bytes = value.len(), "snapshot written");
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

// `<key>.json` stages as `<key>.json.tmp` beside it.
fn staging_path(path: &Path) -> PathBuf {
    path.with_extension(format!("{FILE_EXTENSION}.{TMP_SUFFIX}"))
}

fn write_staged(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
