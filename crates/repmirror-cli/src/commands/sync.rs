use std::path::Path;

use repmirror_core::config::SyncOptions;
use repmirror_core::db::LibSqlWorkoutRepository;
use repmirror_core::remote::FitocracySession;
use repmirror_core::sync::{SyncJob, SyncReport};

use super::common::open_database;
use super::export::run_export;
use crate::cli::ExportPaths;
use crate::error::CliError;

pub async fn run_sync(
    username: &str,
    password: Option<&str>,
    options: &SyncOptions,
    json: bool,
    outputs: &ExportPaths,
    db_path: &Path,
    mappings_path: &Path,
) -> Result<(), CliError> {
    if let Some(password) = password {
        let report = sync_account(username, password, options, db_path).await?;
        println!("{}", render_sync_report(&report, json)?);
    } else {
        tracing::info!("No password given, skipping sync and exporting stored history");
    }

    run_export(username, outputs, db_path, mappings_path).await
}

async fn sync_account(
    username: &str,
    password: &str,
    options: &SyncOptions,
    db_path: &Path,
) -> Result<SyncReport, CliError> {
    // Authenticate before touching the store.
    let session = FitocracySession::login(&options.remote, username, password).await?;

    let db = open_database(db_path).await?;
    let repo = LibSqlWorkoutRepository::new(db.connection());
    let report = SyncJob::new(&repo, &session)
        .with_policy(options.failure_policy)
        .run(session.user_id(), username)
        .await?;
    Ok(report)
}

pub fn render_sync_report(report: &SyncReport, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(format_sync_summary(report))
    }
}

pub fn format_sync_summary(report: &SyncReport) -> String {
    let pipeline = &report.pipeline;
    let mut summary = format!(
        "Synced {}: {} activities, {} new records ({} already stored)",
        report.user.fitocracy_username,
        report.activities_counted,
        pipeline.records_inserted,
        pipeline
            .records_seen
            .saturating_sub(pipeline.records_inserted + pipeline.records_skipped),
    );
    if pipeline.activities_failed > 0 || pipeline.records_skipped > 0 {
        summary.push_str(&format!(
            ", {} activities failed, {} records skipped",
            pipeline.activities_failed, pipeline.records_skipped
        ));
    }
    summary
}
