use std::result::Result as StdResult;

use spendview_config::ConfigError;
use spendview_core::CoreError;
use thiserror::Error;

/// Unified error type for the storage, config and service layers.
#[derive(Error, Debug)]
pub enum SpendError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, SpendError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SpendError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for SpendError {
    fn from(err: std::io::Error) -> Self {
        SpendError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for SpendError {
    fn from(err: serde_json::Error) -> Self {
        SpendError::StorageError(err.to_string())
    }
}

impl From<CoreError> for SpendError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ExpenseNotFound(id) => SpendError::ExpenseNotFound(id),
            CoreError::InvalidOperation(message) | CoreError::Validation(message) => {
                SpendError::InvalidInput(message)
            }
        }
    }
}

impl From<ConfigError> for SpendError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => SpendError::StorageError(io.to_string()),
            ConfigError::Serde(message) => SpendError::ConfigError(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(SpendError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
