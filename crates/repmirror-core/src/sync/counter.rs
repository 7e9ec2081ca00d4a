//! Refresh the per-activity counts that drive the detail fetch

use crate::db::WorkoutRepository;
use crate::models::{Activity, User, UserActivityCount};
use crate::remote::RemoteClient;
use crate::Result;

/// Store every (activity, count) pair the remote reports for `user`
///
/// Each pair upserts the activity (overwriting its name) and then the count.
/// The first failure aborts the step. Returns the number of pairs stored.
pub async fn count_activities<R, C>(repo: &R, client: &C, user: &User) -> Result<usize>
where
    R: WorkoutRepository,
    C: RemoteClient,
{
    let activities = client.list_activity_counts(user.fitocracy_id).await?;

    for remote in &activities {
        repo.upsert_activity(&Activity::new(remote.id, remote.name.clone()))
            .await?;
        repo.upsert_user_activity_count(&UserActivityCount::new(user.id, remote.id, remote.count))
            .await?;
        tracing::debug!("Counted {} x {} ({})", remote.count, remote.name, remote.id);
    }

    tracing::info!(
        "Stored {} activity counts for user {}",
        activities.len(),
        user.fitocracy_id
    );
    Ok(activities.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, LibSqlWorkoutRepository};
    use crate::remote::fake::ScriptedClient;
    use crate::remote::RemoteError;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_count_activities_seeds_work_list() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlWorkoutRepository::new(db.connection());
        let user = repo.insert_user(42, "lifter").await.unwrap();
        let client = ScriptedClient::default()
            .with_activity(396, "Bench Press", 2)
            .with_activity(1, "Squat", 8);

        let stored = count_activities(&repo, &client, &user).await.unwrap();
        assert_eq!(stored, 2);

        let counts = repo.list_counts_for_user(user.id).await.unwrap();
        let pairs = counts
            .iter()
            .map(|c| (c.activity_id, c.count))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(1, 8), (396, 2)]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_count_activities_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlWorkoutRepository::new(db.connection());
        let user = repo.insert_user(42, "lifter").await.unwrap();
        let client = ScriptedClient::default().with_activity(396, "Bench Press", 2);

        count_activities(&repo, &client, &user).await.unwrap();
        count_activities(&repo, &client, &user).await.unwrap();

        assert_eq!(repo.list_counts_for_user(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_count_activities_with_no_history() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlWorkoutRepository::new(db.connection());
        let user = repo.insert_user(42, "lifter").await.unwrap();

        let stored = count_activities(&repo, &ScriptedClient::default(), &user)
            .await
            .unwrap();
        assert_eq!(stored, 0);
        assert!(repo.list_counts_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_count_activities_fails_when_listing_fails() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlWorkoutRepository::new(db.connection());
        let user = repo.insert_user(42, "lifter").await.unwrap();
        let client = ScriptedClient::default()
            .with_activity(396, "Bench Press", 2)
            .failing_counts();

        let result = count_activities(&repo, &client, &user).await;

        assert!(matches!(
            result,
            Err(crate::Error::Remote(RemoteError::Api { status: 503, .. }))
        ));
        assert!(repo.get_activity(396).await.unwrap().is_none());
        assert!(repo.list_counts_for_user(user.id).await.unwrap().is_empty());
    }
}
