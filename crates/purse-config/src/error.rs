use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed config at {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}
