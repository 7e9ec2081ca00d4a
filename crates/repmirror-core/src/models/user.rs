//! User model

use serde::{Deserialize, Serialize};

/// A Fitocracy account mirrored into the local store
///
/// Created once on the first sync for a username and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Local surrogate id
    pub id: i64,
    /// Remote user id reported by the login handshake
    pub fitocracy_id: i64,
    /// Remote username
    pub fitocracy_username: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}
