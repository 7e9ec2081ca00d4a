//! Configuration inputs: the exercise mapping file and sync options.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::mapper::ExerciseMapping;
use crate::remote::RemoteOptions;
use crate::sync::FailurePolicy;

/// Default location of the mapping file, relative to the working directory
pub const DEFAULT_MAPPING_FILE: &str = "exercise_mappings.toml";

/// Top-level layout of the mapping file
///
/// ```toml
/// [[exercises]]
/// fitocracy_name = "Barbell Bench Press"
/// fitocracy_id = 1
/// virtuagym_name = "Bench press"
/// virtuagym_id = 55
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MappingFile {
    #[serde(default)]
    pub exercises: Vec<ExerciseMapping>,
}

/// Parse a mapping file from its TOML text
pub fn parse_mapping_file(contents: &str) -> Result<Vec<ExerciseMapping>> {
    let file: MappingFile = toml::from_str(contents)
        .map_err(|error| Error::Config(format!("invalid exercise mapping file: {error}")))?;
    Ok(file.exercises)
}

/// Load the mapping file at `path`
///
/// A missing file yields no mappings so an export can still run; VirtuaGym
/// output will simply be empty.
pub fn load_mapping_file(path: impl AsRef<Path>) -> Result<Vec<ExerciseMapping>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let exercises = parse_mapping_file(&contents)?;
            tracing::debug!(
                "Loaded {} exercise mappings from {}",
                exercises.len(),
                path.display()
            );
            Ok(exercises)
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Exercise mapping file {} not found", path.display());
            Ok(Vec::new())
        }
        Err(error) => Err(error.into()),
    }
}

/// Options for one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub remote: RemoteOptions,
    pub failure_policy: FailurePolicy,
}

impl SyncOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.remote = self.remote.with_timeout(timeout);
        self
    }

    #[must_use]
    pub const fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
