use purse_domain::UnknownPeriod;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid budget period: {0}")]
    InvalidPeriod(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownPeriod> for CoreError {
    fn from(err: UnknownPeriod) -> Self {
        CoreError::InvalidPeriod(err.0)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
