//! repmirror - mirror Fitocracy workout history and export it as CSV
//!
//! `repmirror sync --user NAME` logs in, refreshes the local store and writes
//! both CSV exports. `repmirror export` rebuilds the CSVs from the store alone.

mod cli;
mod commands;
mod error;

use std::time::Duration;

use clap::Parser;
use repmirror_core::config::SyncOptions;
use repmirror_core::sync::FailurePolicy;

use crate::cli::{Cli, Commands};
use crate::commands::activities::run_activities;
use crate::commands::common::{
    normalize_username, resolve_db_path, resolve_mappings_path, resolve_password,
};
use crate::commands::export::run_export;
use crate::commands::sync::run_sync;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "repmirror=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("{}", exit_message(&error));
        std::process::exit(1);
    }
}

fn exit_message(error: &CliError) -> String {
    format!("Error: {error}")
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);
    let mappings_path = resolve_mappings_path(cli.mappings);

    match cli.command {
        Commands::Sync {
            user,
            password,
            continue_on_error,
            timeout_secs,
            base_url,
            json,
            outputs,
        } => {
            let username = normalize_username(&user)?;
            let password = resolve_password(password);
            let options = sync_options(continue_on_error, timeout_secs, base_url);
            run_sync(
                &username,
                password.as_deref(),
                &options,
                json,
                &outputs,
                &db_path,
                &mappings_path,
            )
            .await?;
        }
        Commands::Export { user, outputs } => {
            let username = normalize_username(&user)?;
            run_export(&username, &outputs, &db_path, &mappings_path).await?;
        }
        Commands::Activities { user, json } => {
            let username = normalize_username(&user)?;
            run_activities(&username, json, &db_path).await?;
        }
    }

    Ok(())
}

fn sync_options(
    continue_on_error: bool,
    timeout_secs: u64,
    base_url: Option<String>,
) -> SyncOptions {
    let policy = if continue_on_error {
        FailurePolicy::ContinueOnError
    } else {
        FailurePolicy::FailFast
    };

    let mut options = SyncOptions::default()
        .with_timeout(Duration::from_secs(timeout_secs))
        .with_failure_policy(policy);
    if let Some(base_url) = base_url {
        options.remote.base_url = base_url;
    }
    options
}
