//! CLI-specific error types

use thiserror::Error;

use crate::api::config::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Storage error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Server I/O error
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
