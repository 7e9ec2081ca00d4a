//! Activity and per-user count models

use serde::{Deserialize, Serialize};

/// A named exercise type, keyed by the remote service's own id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    /// Creation timestamp (Unix ms), preserved across renames
    pub created_at: i64,
}

impl Activity {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Remote running total of logged entries for one (user, activity) pair
///
/// The set of rows for a user is the work list for the detail fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivityCount {
    pub user_id: i64,
    pub activity_id: i64,
    pub count: i64,
    pub created_at: i64,
}

impl UserActivityCount {
    #[must_use]
    pub fn new(user_id: i64, activity_id: i64, count: i64) -> Self {
        Self {
            user_id,
            activity_id,
            count,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
