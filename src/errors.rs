use spendwise_config::ConfigError;
use spendwise_core::CoreError;
use spendwise_domain::{CategoryError, DateRangeError, GoalError, PriceError};
use thiserror::Error;

/// Unified error type for the core, storage and configuration layers.
#[derive(Debug, Error)]
pub enum SpendError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SpendError>;

impl SpendError {
    pub fn is_storage_failure(&self) -> bool {
        match self {
            SpendError::Core(err) => err.is_storage_failure(),
            SpendError::Config(ConfigError::Io(_)) => true,
            _ => false,
        }
    }
}

impl From<DateRangeError> for SpendError {
    fn from(err: DateRangeError) -> Self {
        SpendError::Core(err.into())
    }
}

impl From<PriceError> for SpendError {
    fn from(err: PriceError) -> Self {
        SpendError::InvalidInput(err.to_string())
    }
}

impl From<GoalError> for SpendError {
    fn from(err: GoalError) -> Self {
        SpendError::Core(err.into())
    }
}

impl From<CategoryError> for SpendError {
    fn from(err: CategoryError) -> Self {
        SpendError::Core(err.into())
    }
}
