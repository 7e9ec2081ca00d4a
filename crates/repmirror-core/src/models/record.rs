//! Performed activity records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One logged instance of a user performing an activity
///
/// `id` is assigned by the remote service and is the idempotency key: a
/// record is inserted once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformedRecord {
    pub id: i64,
    pub user_id: i64,
    pub activity_id: i64,
    /// Remote id of the workout entry this record was logged in
    pub group_id: i64,
    /// Unit label, empty when the remote entry carried none
    pub units: String,
    pub reps: f64,
    pub weight: f64,
    /// Remote performance time (zone-less)
    pub performed_at: NaiveDateTime,
    /// Local creation timestamp (Unix ms)
    pub created_at: i64,
}

/// A performed record joined with its activity's name, used for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetail {
    pub id: i64,
    pub user_id: i64,
    pub activity_id: i64,
    pub activity_name: String,
    pub group_id: i64,
    pub units: String,
    pub reps: f64,
    pub weight: f64,
    pub performed_at: NaiveDateTime,
}
