use purse_config::ConfigError;
use purse_core::CoreError;
use thiserror::Error;

/// Failures surfaced by the application facade.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type AppResult<T> = Result<T, AppError>;
