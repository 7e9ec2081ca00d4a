use std::path::Path;

use super::common::{format_count_lines, list_user_counts};
use crate::error::CliError;

pub async fn run_activities(username: &str, json: bool, db_path: &Path) -> Result<(), CliError> {
    let items = list_user_counts(username, db_path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No activities stored for {username}.");
        return Ok(());
    }

    for line in format_count_lines(&items) {
        println!("{line}");
    }

    Ok(())
}
