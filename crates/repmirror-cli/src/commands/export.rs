use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use repmirror_core::export::{export_details, ExportFormat};
use repmirror_core::{ActivityDetail, ExerciseMapper};

use super::common::{list_user_details, load_mapper};
use crate::cli::ExportPaths;
use crate::error::CliError;

pub async fn run_export(
    username: &str,
    outputs: &ExportPaths,
    db_path: &Path,
    mappings_path: &Path,
) -> Result<(), CliError> {
    let mapper = load_mapper(mappings_path)?;
    let details = list_user_details(username, db_path).await?;

    for (format, path) in [
        (ExportFormat::Fitocracy, outputs.fitocracy_csv.as_path()),
        (ExportFormat::VirtuaGym, outputs.virtuagym_csv.as_path()),
    ] {
        let written = write_export_file(path, &details, format, &mapper)?;
        tracing::info!("Wrote {written} {format:?} rows to {}", path.display());
        println!("{}", path.display());
    }

    Ok(())
}

pub fn write_export_file(
    path: &Path,
    details: &[ActivityDetail],
    format: ExportFormat,
    mapper: &ExerciseMapper,
) -> Result<usize, CliError> {
    let file = File::create(path)?;
    Ok(export_details(BufWriter::new(file), details, format, mapper)?)
}
