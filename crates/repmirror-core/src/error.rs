//! Error types for repmirror-core

use thiserror::Error;

use crate::remote::RemoteError;

/// Result type alias using repmirror-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repmirror-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote service error (authentication, fetch or payload)
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Malformed timestamp or unexpected stored value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
