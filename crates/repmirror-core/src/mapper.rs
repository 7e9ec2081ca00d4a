//! Static translation between Fitocracy activity ids and other catalogs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the exercise mapping file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMapping {
    pub fitocracy_name: String,
    pub fitocracy_id: i64,
    #[serde(default)]
    pub mfp_name: Option<String>,
    #[serde(default)]
    pub mfp_id: Option<i64>,
    #[serde(default)]
    pub virtuagym_name: Option<String>,
    #[serde(default)]
    pub virtuagym_id: Option<i64>,
}

impl ExerciseMapping {
    /// The VirtuaGym id, when the entry has a usable one
    pub fn virtuagym_id(&self) -> Option<i64> {
        self.virtuagym_id.filter(|id| *id > 0)
    }
}

/// Read-only lookup tables, built once from the mapping file
#[derive(Debug, Clone, Default)]
pub struct ExerciseMapper {
    by_fitocracy_id: HashMap<i64, ExerciseMapping>,
    by_virtuagym_id: HashMap<i64, ExerciseMapping>,
}

impl ExerciseMapper {
    /// Build both indexes; entries without a VirtuaGym id are left out of
    /// that index with a warning.
    pub fn new(exercises: Vec<ExerciseMapping>) -> Self {
        let mut by_fitocracy_id = HashMap::with_capacity(exercises.len());
        let mut by_virtuagym_id = HashMap::new();

        for exercise in exercises {
            if let Some(virtuagym_id) = exercise.virtuagym_id() {
                by_virtuagym_id.insert(virtuagym_id, exercise.clone());
            } else {
                tracing::warn!(
                    "No virtuagym mapping for {} - {}",
                    exercise.fitocracy_id,
                    exercise.fitocracy_name
                );
            }
            by_fitocracy_id.insert(exercise.fitocracy_id, exercise);
        }

        Self {
            by_fitocracy_id,
            by_virtuagym_id,
        }
    }

    pub fn by_fitocracy_id(&self, fitocracy_id: i64) -> Option<&ExerciseMapping> {
        self.by_fitocracy_id.get(&fitocracy_id)
    }

    pub fn by_virtuagym_id(&self, virtuagym_id: i64) -> Option<&ExerciseMapping> {
        self.by_virtuagym_id.get(&virtuagym_id)
    }

    /// VirtuaGym id for a Fitocracy activity, if one is mapped
    pub fn virtuagym_id_for(&self, fitocracy_id: i64) -> Option<i64> {
        self.by_fitocracy_id(fitocracy_id)
            .and_then(ExerciseMapping::virtuagym_id)
    }

    pub fn len(&self) -> usize {
        self.by_fitocracy_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fitocracy_id.is_empty()
    }
}
