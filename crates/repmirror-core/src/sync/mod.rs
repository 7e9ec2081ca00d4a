//! Mirror one user's Fitocracy history into the local store.
//!
//! A run has three steps: make sure the user row exists, refresh the
//! per-activity counts ([`counter`]), then fetch and persist every activity's
//! history ([`pipeline`]).

pub mod counter;
pub mod pipeline;

use serde::Serialize;

use crate::db::WorkoutRepository;
use crate::models::User;
use crate::remote::RemoteClient;
use crate::Result;

pub use counter::count_activities;
pub use pipeline::PipelineReport;

/// What to do when one activity's history cannot be fetched or parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run on the first error
    #[default]
    FailFast,
    /// Log and skip the failing activity or record, then keep going.
    /// Store errors still stop the run.
    ContinueOnError,
}

/// Outcome of a completed sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub user: User,
    pub activities_counted: usize,
    pub pipeline: PipelineReport,
}

/// One sync run for a single user
pub struct SyncJob<'a, R, C> {
    repo: &'a R,
    client: &'a C,
    policy: FailurePolicy,
}

impl<'a, R, C> SyncJob<'a, R, C>
where
    R: WorkoutRepository,
    C: RemoteClient,
{
    pub const fn new(repo: &'a R, client: &'a C) -> Self {
        Self {
            repo,
            client,
            policy: FailurePolicy::FailFast,
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the full sync for an authenticated account
    pub async fn run(&self, remote_user_id: i64, username: &str) -> Result<SyncReport> {
        tracing::info!("Looking up user {username} ({remote_user_id})");
        let user = ensure_user(self.repo, remote_user_id, username).await?;

        let activities_counted = count_activities(self.repo, self.client, &user).await?;
        let counts = self.repo.list_counts_for_user(user.id).await?;
        let pipeline = pipeline::run(self.repo, self.client, &user, &counts, self.policy).await?;

        tracing::info!(
            "Sync finished for {username}: {} activities, {} new records",
            activities_counted,
            pipeline.records_inserted
        );

        Ok(SyncReport {
            user,
            activities_counted,
            pipeline,
        })
    }
}

/// Fetch the user row for a remote id, creating it on first sight
pub async fn ensure_user<R: WorkoutRepository>(
    repo: &R,
    remote_user_id: i64,
    username: &str,
) -> Result<User> {
    if let Some(user) = repo.get_user_by_remote_id(remote_user_id).await? {
        return Ok(user);
    }

    let user = repo.insert_user(remote_user_id, username).await?;
    tracing::info!("Created local user {} for {username}", user.id);
    Ok(user)
}
