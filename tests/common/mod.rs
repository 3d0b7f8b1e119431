#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use purse_config::Config;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn scratch_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Config pinned to its own scratch data directory.
pub fn isolated_config() -> Config {
    Config {
        data_dir: Some(scratch_dir().join("data")),
        ..Config::default()
    }
}
