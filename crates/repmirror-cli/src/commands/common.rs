use std::env;
use std::path::{Path, PathBuf};

use repmirror_core::config::{load_mapping_file, DEFAULT_MAPPING_FILE};
use repmirror_core::db::{Database, LibSqlWorkoutRepository, WorkoutRepository};
use repmirror_core::util::normalize_text_option;
use repmirror_core::{ActivityDetail, ExerciseMapper, User};
use serde::Serialize;

use crate::error::CliError;

pub const DB_PATH_ENV: &str = "REPMIRROR_DB_PATH";
pub const PASSWORD_ENV: &str = "FITOCRACY_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCountItem {
    pub activity_id: i64,
    pub name: String,
    pub count: i64,
}

pub async fn open_database(db_path: &Path) -> Result<Database, CliError> {
    Ok(Database::open(db_path).await?)
}

pub fn normalize_username(raw: &str) -> Result<String, CliError> {
    normalize_text_option(Some(raw.to_string())).ok_or(CliError::EmptyUsername)
}

pub async fn find_user<R: WorkoutRepository>(repo: &R, username: &str) -> Result<User, CliError> {
    repo.get_user_by_username(username)
        .await?
        .ok_or_else(|| CliError::UserNotFound(username.to_string()))
}

pub async fn list_user_details(
    username: &str,
    db_path: &Path,
) -> Result<Vec<ActivityDetail>, CliError> {
    let db = open_database(db_path).await?;
    let repo = LibSqlWorkoutRepository::new(db.connection());
    let user = find_user(&repo, username).await?;
    Ok(repo.list_detail_rows_for_user(user.id).await?)
}

pub async fn list_user_counts(
    username: &str,
    db_path: &Path,
) -> Result<Vec<ActivityCountItem>, CliError> {
    let db = open_database(db_path).await?;
    let repo = LibSqlWorkoutRepository::new(db.connection());
    let user = find_user(&repo, username).await?;

    let mut items = Vec::new();
    for count in repo.list_counts_for_user(user.id).await? {
        let name = repo
            .get_activity(count.activity_id)
            .await?
            .map(|activity| activity.name)
            .unwrap_or_default();
        items.push(ActivityCountItem {
            activity_id: count.activity_id,
            name,
            count: count.count,
        });
    }
    Ok(items)
}

pub fn format_count_lines(items: &[ActivityCountItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| format!("{:>8}  {:>5}  {}", item.activity_id, item.count, item.name))
        .collect()
}

pub fn load_mapper(mappings_path: &Path) -> Result<ExerciseMapper, CliError> {
    Ok(ExerciseMapper::new(load_mapping_file(mappings_path)?))
}

pub fn resolve_password(cli_password: Option<String>) -> Option<String> {
    cli_password
        .filter(|value| !value.is_empty())
        .or_else(|| env::var(PASSWORD_ENV).ok().filter(|value| !value.is_empty()))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_db_path {
        return path;
    }

    if let Some(path) = normalize_text_option(env::var(DB_PATH_ENV).ok()) {
        return PathBuf::from(path);
    }

    default_db_path()
}

pub fn resolve_mappings_path(cli_mappings: Option<PathBuf>) -> PathBuf {
    cli_mappings.unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_FILE))
}

fn default_db_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("repmirror.db"),
        |dir| dir.join("repmirror").join("repmirror.db"),
    )
}
