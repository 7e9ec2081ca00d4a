//! Remote Fitocracy service access.
//!
//! The sync pipeline only sees the [`RemoteClient`] trait; the HTTP session in
//! [`fitocracy`] is one implementation of it.

mod fitocracy;
mod models;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use thiserror::Error;

pub use fitocracy::{FitocracySession, DEFAULT_BASE_URL};
pub use models::{ApiAction, ApiActionActivity, ApiActivity, ApiActivityHistory, ApiEffort};

/// Per-call timeout; some history endpoints are slow to respond.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error: {message} ({status})")]
    Api { status: u16, message: String },
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Capabilities of an authenticated remote session
#[allow(async_fn_in_trait)]
pub trait RemoteClient {
    /// List the activities a user has logged, with their running counts
    async fn list_activity_counts(&self, remote_user_id: i64) -> RemoteResult<Vec<ApiActivity>>;

    /// Fetch the complete history of one activity
    ///
    /// Implementations must call [`validate_activity_id`] before any I/O.
    async fn fetch_activity_history(
        &self,
        activity_id: i64,
    ) -> RemoteResult<Vec<ApiActivityHistory>>;
}

/// Connection settings for the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RemoteOptions {
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reject activity ids the remote API cannot serve.
pub fn validate_activity_id(activity_id: i64) -> RemoteResult<()> {
    if activity_id == 0 {
        return Err(RemoteError::InvalidArgument(
            "activity id must not be zero".to_string(),
        ));
    }
    Ok(())
}
