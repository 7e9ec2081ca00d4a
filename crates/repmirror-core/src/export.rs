//! CSV projections of stored workout history.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mapper::ExerciseMapper;
use crate::models::ActivityDetail;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Target layout for a CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// `performed_at, activity_id, activity_name, weight, reps`
    Fitocracy,
    /// `performed_at, virtuagym_id, activity_name, reps, weight, units`
    VirtuaGym,
}

impl ExportFormat {
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Fitocracy => "fitocracy.csv",
            Self::VirtuaGym => "virtuagym.csv",
        }
    }
}

/// Build the CSV fields for one record, or `None` when the target catalog
/// has no mapping for its activity.
#[must_use]
pub fn project_row(
    detail: &ActivityDetail,
    format: ExportFormat,
    mapper: &ExerciseMapper,
) -> Option<Vec<String>> {
    let performed_at = detail.performed_at.format(TIMESTAMP_FORMAT).to_string();

    match format {
        ExportFormat::Fitocracy => Some(vec![
            performed_at,
            detail.activity_id.to_string(),
            detail.activity_name.clone(),
            format_number(detail.weight),
            format_number(detail.reps),
        ]),
        ExportFormat::VirtuaGym => {
            let virtuagym_id = mapper.virtuagym_id_for(detail.activity_id)?;
            Some(vec![
                performed_at,
                virtuagym_id.to_string(),
                detail.activity_name.clone(),
                format_number(detail.reps),
                format_number(detail.weight),
                detail.units.clone(),
            ])
        }
    }
}

/// Project every record, dropping the ones the format cannot represent
#[must_use]
pub fn project_rows(
    details: &[ActivityDetail],
    format: ExportFormat,
    mapper: &ExerciseMapper,
) -> Vec<Vec<String>> {
    details
        .iter()
        .filter_map(|detail| project_row(detail, format, mapper))
        .collect()
}

/// Write rows without a header and return how many were written
pub fn write_csv<W: Write>(writer: W, rows: &[Vec<String>]) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;

    Ok(rows.len())
}

/// Project and write in one step
pub fn export_details<W: Write>(
    writer: W,
    details: &[ActivityDetail],
    format: ExportFormat,
    mapper: &ExerciseMapper,
) -> Result<usize> {
    let rows = project_rows(details, format, mapper);
    write_csv(writer, &rows)
}

/// Shortest decimal form: `135` rather than `135.0`
fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::ExerciseMapping;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn detail(
        id: i64,
        activity_id: i64,
        name: &str,
        hms: (u32, u32, u32),
        weight: f64,
    ) -> ActivityDetail {
        ActivityDetail {
            id,
            user_id: 1,
            activity_id,
            activity_name: name.to_string(),
            group_id: 555,
            units: "lb".to_string(),
            reps: 5.0,
            weight,
            performed_at: NaiveDate::from_ymd_opt(2016, 4, 28)
                .unwrap()
                .and_hms_opt(hms.0, hms.1, hms.2)
                .unwrap(),
        }
    }

    fn bench_press_details() -> Vec<ActivityDetail> {
        vec![
            detail(1001, 396, "Bench Press", (14, 36, 57), 135.0),
            detail(1002, 396, "Bench Press", (15, 0, 0), 140.0),
        ]
    }

    fn render(
        details: &[ActivityDetail],
        format: ExportFormat,
        mapper: &ExerciseMapper,
    ) -> String {
        let mut buffer = Vec::new();
        export_details(&mut buffer, details, format, mapper).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn fitocracy_export_columns() {
        let rendered = render(
            &bench_press_details(),
            ExportFormat::Fitocracy,
            &ExerciseMapper::default(),
        );
        assert_eq!(
            rendered,
            "2016-04-28 14:36:57,396,Bench Press,135,5\n2016-04-28 15:00:00,396,Bench Press,140,5\n"
        );
    }

    #[test]
    fn virtuagym_export_uses_mapped_id_and_units() {
        let mapper = ExerciseMapper::new(vec![ExerciseMapping {
            fitocracy_name: "Bench Press".to_string(),
            fitocracy_id: 396,
            mfp_name: None,
            mfp_id: None,
            virtuagym_name: Some("Bench press".to_string()),
            virtuagym_id: Some(55),
        }]);

        let rows = project_rows(&bench_press_details(), ExportFormat::VirtuaGym, &mapper);
        assert_eq!(
            rows[0],
            vec!["2016-04-28 14:36:57", "55", "Bench Press", "5", "135", "lb"]
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn unmapped_activity_is_omitted_only_from_virtuagym() {
        let mut details = bench_press_details();
        details.push(detail(2001, 7, "Mystery Lift", (16, 0, 0), 52.5));
        let mapper = ExerciseMapper::new(vec![ExerciseMapping {
            fitocracy_name: "Bench Press".to_string(),
            fitocracy_id: 396,
            mfp_name: None,
            mfp_id: None,
            virtuagym_name: None,
            virtuagym_id: Some(55),
        }]);

        let virtuagym = project_rows(&details, ExportFormat::VirtuaGym, &mapper);
        assert_eq!(virtuagym.len(), 2);
        assert!(virtuagym.iter().all(|row| row[1] == "55"));

        let fitocracy = project_rows(&details, ExportFormat::Fitocracy, &mapper);
        assert_eq!(fitocracy.len(), 3);
        assert_eq!(fitocracy[2][1], "7");
        assert_eq!(fitocracy[2][3], "52.5");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let details = vec![detail(1, 9, "Curl, Hammer", (9, 0, 0), 30.0)];
        let rendered = render(&details, ExportFormat::Fitocracy, &ExerciseMapper::default());
        assert_eq!(rendered, "2016-04-28 09:00:00,9,\"Curl, Hammer\",30,5\n");
    }

    #[test]
    fn default_file_names() {
        assert_eq!(ExportFormat::Fitocracy.default_file_name(), "fitocracy.csv");
        assert_eq!(ExportFormat::VirtuaGym.default_file_name(), "virtuagym.csv");
    }
}
