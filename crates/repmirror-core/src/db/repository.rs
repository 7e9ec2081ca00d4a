//! Workout repository implementation

use chrono::{DateTime, NaiveDateTime};
use libsql::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::models::{Activity, ActivityDetail, PerformedRecord, User, UserActivityCount};

/// Trait for workout storage operations (async)
///
/// Every write is a single statement; callers get no cross-row transaction.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// Insert an activity, or overwrite its name if the id already exists
    async fn upsert_activity(&self, activity: &Activity) -> Result<()>;

    /// Insert a count row, or overwrite the count if the pair already exists
    async fn upsert_user_activity_count(&self, count: &UserActivityCount) -> Result<()>;

    /// Insert a performed record unless its id is already stored
    ///
    /// Returns `true` when a row was written and `false` on an id conflict.
    async fn insert_ignore_performed_record(&self, record: &PerformedRecord) -> Result<bool>;

    /// Look up a user by remote user id
    async fn get_user_by_remote_id(&self, fitocracy_id: i64) -> Result<Option<User>>;

    /// Look up a user by remote username
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a user row
    async fn insert_user(&self, fitocracy_id: i64, username: &str) -> Result<User>;

    /// Get an activity by id
    async fn get_activity(&self, id: i64) -> Result<Option<Activity>>;

    /// List every count row for a user, ordered by activity id
    async fn list_counts_for_user(&self, user_id: i64) -> Result<Vec<UserActivityCount>>;

    /// List a user's performed records joined with activity names
    async fn list_detail_rows_for_user(&self, user_id: i64) -> Result<Vec<ActivityDetail>>;
}

/// libSQL implementation of `WorkoutRepository`
pub struct LibSqlWorkoutRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlWorkoutRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn query_user(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Option<User>> {
        let mut rows = self.conn.query(sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_user(&row)?)),
            None => Ok(None),
        }
    }

    fn parse_user(row: &Row) -> Result<User> {
        Ok(User {
            id: row.get(0)?,
            fitocracy_id: row.get(1)?,
            fitocracy_username: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn parse_count(row: &Row) -> Result<UserActivityCount> {
        Ok(UserActivityCount {
            user_id: row.get(0)?,
            activity_id: row.get(1)?,
            count: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn parse_detail(row: &Row) -> Result<ActivityDetail> {
        Ok(ActivityDetail {
            id: row.get(0)?,
            user_id: row.get(1)?,
            activity_id: row.get(2)?,
            activity_name: row.get(3)?,
            group_id: row.get(4)?,
            units: row.get(5)?,
            reps: row.get(6)?,
            weight: row.get(7)?,
            performed_at: from_unix_seconds(row.get(8)?)?,
        })
    }
}

impl WorkoutRepository for LibSqlWorkoutRepository<'_> {
    async fn upsert_activity(&self, activity: &Activity) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO activities (id, name, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![activity.id, activity.name.as_str(), activity.created_at],
            )
            .await?;
        Ok(())
    }

    async fn upsert_user_activity_count(&self, count: &UserActivityCount) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO user_activity_counts (user_id, activity_id, count, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, activity_id) DO UPDATE SET count = excluded.count",
                params![
                    count.user_id,
                    count.activity_id,
                    count.count,
                    count.created_at
                ],
            )
            .await?;
        Ok(())
    }

    async fn insert_ignore_performed_record(&self, record: &PerformedRecord) -> Result<bool> {
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO user_activities
                    (id, fitocracy_group_id, user_id, activity_id, units, reps, weight, performed_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id,
                    record.group_id,
                    record.user_id,
                    record.activity_id,
                    record.units.as_str(),
                    record.reps,
                    record.weight,
                    to_unix_seconds(record.performed_at),
                    record.created_at
                ],
            )
            .await?;
        Ok(inserted > 0)
    }

    async fn get_user_by_remote_id(&self, fitocracy_id: i64) -> Result<Option<User>> {
        self.query_user(
            "SELECT id, fitocracy_id, fitocracy_username, created_at FROM users WHERE fitocracy_id = ?1",
            params![fitocracy_id],
        )
        .await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.query_user(
            "SELECT id, fitocracy_id, fitocracy_username, created_at FROM users WHERE fitocracy_username = ?1",
            params![username],
        )
        .await
    }

    async fn insert_user(&self, fitocracy_id: i64, username: &str) -> Result<User> {
        let created_at = chrono::Utc::now().timestamp_millis();
        self.conn
            .execute(
                "INSERT INTO users (fitocracy_id, fitocracy_username, created_at) VALUES (?1, ?2, ?3)",
                params![fitocracy_id, username, created_at],
            )
            .await?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            fitocracy_id,
            fitocracy_username: username.to_string(),
            created_at,
        })
    }

    async fn get_activity(&self, id: i64) -> Result<Option<Activity>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, name, created_at FROM activities WHERE id = ?1",
                params![id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Activity {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })),
            None => Ok(None),
        }
    }

    async fn list_counts_for_user(&self, user_id: i64) -> Result<Vec<UserActivityCount>> {
        let mut rows = self
            .conn
            .query(
                "SELECT user_id, activity_id, count, created_at
                 FROM user_activity_counts
                 WHERE user_id = ?1
                 ORDER BY activity_id",
                params![user_id],
            )
            .await?;

        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            counts.push(Self::parse_count(&row)?);
        }
        Ok(counts)
    }

    async fn list_detail_rows_for_user(&self, user_id: i64) -> Result<Vec<ActivityDetail>> {
        let mut rows = self
            .conn
            .query(
                "SELECT ua.id, ua.user_id, ua.activity_id, a.name, ua.fitocracy_group_id,
                        ua.units, ua.reps, ua.weight, ua.performed_at
                 FROM user_activities ua
                 JOIN activities a ON ua.activity_id = a.id
                 WHERE ua.user_id = ?1
                 ORDER BY ua.performed_at, ua.id",
                params![user_id],
            )
            .await?;

        let mut details = Vec::new();
        while let Some(row) = rows.next().await? {
            details.push(Self::parse_detail(&row)?);
        }
        Ok(details)
    }
}

/// Remote times carry no zone, so they are stored as if they were UTC.
fn to_unix_seconds(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp()
}

fn from_unix_seconds(seconds: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0)
        .map(|value| value.naive_utc())
        .ok_or_else(|| Error::Parse(format!("stored performed_at out of range: {seconds}")))
}
