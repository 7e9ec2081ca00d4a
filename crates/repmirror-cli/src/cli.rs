use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repmirror")]
#[command(about = "Mirror Fitocracy workout history into SQLite and export it as CSV")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Exercise mapping file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub mappings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sync history from Fitocracy, then export both CSV formats
    ///
    /// Without a password (flag or FITOCRACY_PASSWORD) the sync is skipped
    /// and the CSVs are rebuilt from the local store.
    Sync {
        /// Fitocracy username
        #[arg(short, long, value_name = "NAME")]
        user: String,
        /// Fitocracy password
        #[arg(short, long, value_name = "PASSWORD")]
        password: Option<String>,
        /// Skip activities whose history cannot be fetched instead of stopping
        #[arg(long)]
        continue_on_error: bool,
        /// Per-request timeout in seconds
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout_secs: u64,
        /// Override the Fitocracy base URL
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Print the sync summary as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        outputs: ExportPaths,
    },
    /// Export stored history without contacting Fitocracy
    Export {
        /// Fitocracy username
        #[arg(short, long, value_name = "NAME")]
        user: String,
        #[command(flatten)]
        outputs: ExportPaths,
    },
    /// List stored activity counts for a user
    Activities {
        /// Fitocracy username
        #[arg(short, long, value_name = "NAME")]
        user: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Destination files for the two CSV formats
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct ExportPaths {
    /// Output path for the Fitocracy-shaped CSV
    #[arg(long, value_name = "PATH", default_value = "fitocracy.csv")]
    pub fitocracy_csv: PathBuf,
    /// Output path for the VirtuaGym import CSV
    #[arg(long, value_name = "PATH", default_value = "virtuagym.csv")]
    pub virtuagym_csv: PathBuf,
}
