//! JSON payloads returned by the Fitocracy endpoints

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of `actiontime`, which carries no zone offset
const ACTION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One entry of `get_user_activities`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiActivity {
    pub id: i64,
    pub count: i64,
    pub name: String,
}

/// Unit descriptor attached to an effort slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEffort {
    pub id: i64,
    #[serde(default)]
    pub abbr: String,
    #[serde(default)]
    pub name: String,
}

/// The activity an action belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiActionActivity {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A single logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAction {
    pub id: i64,
    #[serde(rename = "actiontime")]
    pub action_time: String,
    #[serde(rename = "actiondate", default)]
    pub action_date: Option<String>,
    #[serde(default)]
    pub action_group_id: Option<i64>,
    #[serde(default)]
    pub effort0: Option<f64>,
    #[serde(default)]
    pub effort1: Option<f64>,
    #[serde(default)]
    pub effort2: Option<f64>,
    #[serde(default)]
    pub effort3: Option<f64>,
    #[serde(default)]
    pub effort0_unit: Option<ApiEffort>,
    #[serde(default)]
    pub effort1_unit: Option<ApiEffort>,
    #[serde(default)]
    pub effort2_unit: Option<ApiEffort>,
    #[serde(default)]
    pub effort3_unit: Option<ApiEffort>,
    #[serde(rename = "action")]
    pub activity: ApiActionActivity,
}

impl ApiAction {
    /// Unit label: first effort slot's unit, then the second's, else empty
    #[must_use]
    pub fn units(&self) -> String {
        self.effort0_unit
            .as_ref()
            .or(self.effort1_unit.as_ref())
            .map(|unit| unit.abbr.clone())
            .unwrap_or_default()
    }

    /// Parse `actiontime` into a zone-less timestamp
    pub fn performed_at(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(&self.action_time, ACTION_TIME_FORMAT)
    }
}

/// One workout entry in an activity's history, grouping its sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiActivityHistory {
    pub id: i64,
    #[serde(rename = "action_group_id", default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "time", default)]
    pub time: Option<String>,
    #[serde(rename = "original_time", default)]
    pub original_time: Option<String>,
    #[serde(default)]
    pub actions: Vec<ApiAction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_HISTORY: &str = r#"
    [
      {
        "id": 45255911,
        "action_group_id": 45255911,
        "points": 898,
        "name": "Workout A",
        "time": "2016-04-28T14:36:57",
        "original_time": "2016-04-28T15:27:42",
        "actions": [
          {
            "id": 336990561,
            "actiontime": "2016-04-28T14:36:57",
            "actiondate": "2016-04-28",
            "action_group_id": 45255911,
            "effort0": null,
            "effort1": 35,
            "effort0_unit": null,
            "effort1_unit": {"id": 31, "abbr": "reps", "name": "reps"},
            "action": {"id": 396, "name": "Push-Up"}
          },
          {
            "id": 336990562,
            "actiontime": "2016-04-28T14:38:10",
            "actiondate": "2016-04-28",
            "action_group_id": 45255911,
            "effort1": 30,
            "effort1_unit": {"id": 31, "abbr": "reps", "name": "reps"},
            "action": {"id": 396, "name": "Push-Up"},
            "notes": "ignored"
          }
        ]
      }
    ]
    "#;

    fn action(effort0_unit: Option<&str>, effort1_unit: Option<&str>) -> ApiAction {
        let unit = |abbr: &str| ApiEffort {
            id: 1,
            abbr: abbr.to_string(),
            name: abbr.to_string(),
        };
        ApiAction {
            id: 1,
            action_time: "2016-04-28T14:36:57".to_string(),
            action_date: None,
            action_group_id: None,
            effort0: None,
            effort1: None,
            effort2: None,
            effort3: None,
            effort0_unit: effort0_unit.map(unit),
            effort1_unit: effort1_unit.map(unit),
            effort2_unit: None,
            effort3_unit: None,
            activity: ApiActionActivity {
                id: 396,
                name: "Bench Press".to_string(),
            },
        }
    }

    #[test]
    fn parse_activity_history() {
        let histories: Vec<ApiActivityHistory> = serde_json::from_str(SAMPLE_HISTORY).unwrap();

        let first = &histories[0];
        assert_eq!(first.id, 45_255_911);
        assert_eq!(first.name.as_deref(), Some("Workout A"));
        assert_eq!(first.points, Some(898));
        assert_eq!(first.time.as_deref(), Some("2016-04-28T14:36:57"));
        assert_eq!(first.original_time.as_deref(), Some("2016-04-28T15:27:42"));

        assert_eq!(first.actions[0].id, 336_990_561);
        assert_eq!(first.actions[0].effort1, Some(35.0));
        assert_eq!(first.actions[0].effort1_unit.as_ref().map(|u| u.id), Some(31));
        assert_eq!(first.actions[0].action_time, "2016-04-28T14:36:57");
        assert_eq!(first.actions[1].id, 336_990_562);
        assert_eq!(first.actions[1].effort1, Some(30.0));
        assert_eq!(first.actions[1].effort0, None);

        // Sets carry the same group id as the workout entry
        assert_eq!(first.actions[0].action_group_id, Some(first.id));
        assert_eq!(first.actions[1].action_group_id, Some(first.id));

        assert_eq!(first.actions[0].activity.id, 396);
        assert_eq!(first.actions[1].activity.id, 396);
    }

    #[test]
    fn parse_activity_list() {
        let activities: Vec<ApiActivity> =
            serde_json::from_str(r#"[{"id": 396, "count": 2, "name": "Bench Press"}]"#).unwrap();
        assert_eq!(
            activities,
            vec![ApiActivity {
                id: 396,
                count: 2,
                name: "Bench Press".to_string(),
            }]
        );
    }

    #[test]
    fn units_prefers_first_slot() {
        assert_eq!(action(Some("lb"), Some("reps")).units(), "lb");
    }

    #[test]
    fn units_falls_back_to_second_slot() {
        assert_eq!(action(None, Some("reps")).units(), "reps");
    }

    #[test]
    fn units_defaults_to_empty() {
        assert_eq!(action(None, None).units(), "");
    }

    #[test]
    fn performed_at_parses_action_time() {
        let parsed = action(None, None).performed_at().unwrap();
        assert_eq!(parsed.to_string(), "2016-04-28 14:36:57");
    }

    #[test]
    fn performed_at_accepts_fractional_seconds() {
        let action: ApiAction = serde_json::from_str(
            r#"{"id": 1, "actiontime": "2016-04-28T14:36:57.250000", "action": {"id": 396}}"#,
        )
        .unwrap();
        let parsed = action.performed_at().unwrap();
        assert_eq!(parsed.to_string(), "2016-04-28 14:36:57.250");
    }

    #[test]
    fn performed_at_rejects_other_formats() {
        let mut bad = action(None, None);
        bad.action_time = "04/28/2016 14:36".to_string();
        assert!(bad.performed_at().is_err());
    }
}
