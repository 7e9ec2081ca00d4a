//! Fetch/persist pipeline.
//!
//! A producer fetches each counted activity's history, one remote call at a
//! time, and pushes the whole batch onto a bounded channel. A consumer drains
//! the channel and inserts every set with insert-or-ignore. Dropping the
//! sender after the last push is the "no more batches" signal.

use serde::Serialize;
use tokio::sync::mpsc;

use super::FailurePolicy;
use crate::db::WorkoutRepository;
use crate::error::{Error, Result};
use crate::models::{PerformedRecord, User, UserActivityCount};
use crate::remote::{validate_activity_id, ApiAction, ApiActivityHistory, RemoteClient};

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub activities_fetched: usize,
    pub activities_failed: usize,
    pub records_seen: usize,
    pub records_inserted: usize,
    pub records_skipped: usize,
}

/// One activity's full history as returned by the remote
#[derive(Debug)]
struct ActivityBatch {
    activity_id: i64,
    histories: Vec<ApiActivityHistory>,
}

#[derive(Debug, Default)]
struct FetchSummary {
    fetched: usize,
    failed: usize,
}

#[derive(Debug, Default)]
struct StoreSummary {
    seen: usize,
    inserted: usize,
    skipped: usize,
}

/// Fetch and persist the history of every activity in `counts`
///
/// Returns once the producer has closed the channel and the consumer has
/// drained it. Under [`FailurePolicy::FailFast`] the first error ends the run;
/// rows committed before it stay in the store.
pub async fn run<R, C>(
    repo: &R,
    client: &C,
    user: &User,
    counts: &[UserActivityCount],
    policy: FailurePolicy,
) -> Result<PipelineReport>
where
    R: WorkoutRepository,
    C: RemoteClient,
{
    // Room for every batch, so the producer never waits on the consumer
    let (sender, receiver) = mpsc::channel(counts.len().max(1));

    let (fetch, store) = tokio::try_join!(
        produce(client, counts, policy, sender),
        consume(repo, user, policy, receiver),
    )?;

    Ok(PipelineReport {
        activities_fetched: fetch.fetched,
        activities_failed: fetch.failed,
        records_seen: store.seen,
        records_inserted: store.inserted,
        records_skipped: store.skipped,
    })
}

async fn produce<C: RemoteClient>(
    client: &C,
    counts: &[UserActivityCount],
    policy: FailurePolicy,
    sender: mpsc::Sender<ActivityBatch>,
) -> Result<FetchSummary> {
    let mut summary = FetchSummary::default();

    for count in counts {
        let activity_id = count.activity_id;
        tracing::info!("Fetching activity history for activity {activity_id}");

        let fetched = match validate_activity_id(activity_id) {
            Ok(()) => client.fetch_activity_history(activity_id).await,
            Err(error) => Err(error),
        };

        let histories = match fetched {
            Ok(histories) => histories,
            Err(error) if policy == FailurePolicy::ContinueOnError => {
                tracing::warn!("Skipping activity {activity_id}: {error}");
                summary.failed += 1;
                continue;
            }
            Err(error) => return Err(error.into()),
        };

        summary.fetched += 1;
        sender
            .send(ActivityBatch {
                activity_id,
                histories,
            })
            .await
            .map_err(|_| Error::Database("history consumer stopped early".to_string()))?;
    }

    tracing::info!("Completed reading {} activities from Fitocracy", summary.fetched);
    Ok(summary)
}

async fn consume<R: WorkoutRepository>(
    repo: &R,
    user: &User,
    policy: FailurePolicy,
    mut receiver: mpsc::Receiver<ActivityBatch>,
) -> Result<StoreSummary> {
    let mut summary = StoreSummary::default();

    while let Some(batch) = receiver.recv().await {
        for history in &batch.histories {
            tracing::debug!(
                "Looping over sets for [{}] {}",
                history.id,
                history.name.as_deref().unwrap_or_default()
            );

            for action in &history.actions {
                summary.seen += 1;

                let record = match normalize_action(user, history, action) {
                    Ok(record) => record,
                    Err(error) if policy == FailurePolicy::ContinueOnError => {
                        tracing::warn!(
                            "Skipping set {} of activity {}: {error}",
                            action.id,
                            batch.activity_id
                        );
                        summary.skipped += 1;
                        continue;
                    }
                    Err(error) => return Err(error),
                };

                if repo.insert_ignore_performed_record(&record).await? {
                    summary.inserted += 1;
                    tracing::debug!(
                        "Inserted set {} of activity {} performed at {}",
                        record.id,
                        record.activity_id,
                        record.performed_at
                    );
                }
            }
        }
    }

    Ok(summary)
}

/// Turn one remote set into a store row
///
/// Slot mapping: `effort1` is stored as reps and `effort0` as weight. Absent
/// efforts are stored as zero.
pub fn normalize_action(
    user: &User,
    history: &ApiActivityHistory,
    action: &ApiAction,
) -> Result<PerformedRecord> {
    let performed_at = action.performed_at().map_err(|error| {
        Error::Parse(format!(
            "invalid actiontime '{}' for set {}: {error}",
            action.action_time, action.id
        ))
    })?;

    Ok(PerformedRecord {
        id: action.id,
        user_id: user.id,
        activity_id: action.activity.id,
        group_id: history.id,
        units: action.units(),
        reps: action.effort1.unwrap_or_default(),
        weight: action.effort0.unwrap_or_default(),
        performed_at,
        created_at: chrono::Utc::now().timestamp_millis(),
    })
}
