use std::io;

use repmirror_core::remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] repmirror_core::Error),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Username cannot be empty")]
    EmptyUsername,
    #[error("No local data for user {0}. Run `repmirror sync --user {0} --password ...` first.")]
    UserNotFound(String),
}
