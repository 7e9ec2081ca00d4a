//! Scripted in-memory remote used by sync tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{
    validate_activity_id, ApiAction, ApiActionActivity, ApiActivity, ApiActivityHistory,
    ApiEffort, RemoteClient, RemoteError, RemoteResult,
};

#[derive(Default)]
pub struct ScriptedClient {
    pub activities: Vec<ApiActivity>,
    pub histories: HashMap<i64, Vec<ApiActivityHistory>>,
    pub failing_activities: HashSet<i64>,
    pub failing_counts: bool,
    pub history_calls: Mutex<Vec<i64>>,
}

impl ScriptedClient {
    pub fn with_activity(mut self, id: i64, name: &str, count: i64) -> Self {
        self.activities.push(ApiActivity {
            id,
            count,
            name: name.to_string(),
        });
        self
    }

    pub fn with_history(mut self, activity_id: i64, histories: Vec<ApiActivityHistory>) -> Self {
        self.histories.insert(activity_id, histories);
        self
    }

    pub fn failing(mut self, activity_id: i64) -> Self {
        self.failing_activities.insert(activity_id);
        self
    }

    pub fn failing_counts(mut self) -> Self {
        self.failing_counts = true;
        self
    }

    pub fn history_calls(&self) -> Vec<i64> {
        self.history_calls.lock().unwrap().clone()
    }
}

impl RemoteClient for ScriptedClient {
    async fn list_activity_counts(&self, remote_user_id: i64) -> RemoteResult<Vec<ApiActivity>> {
        if self.failing_counts {
            return Err(RemoteError::Api {
                status: 503,
                message: format!("activities for {remote_user_id} unavailable"),
            });
        }
        Ok(self.activities.clone())
    }

    async fn fetch_activity_history(
        &self,
        activity_id: i64,
    ) -> RemoteResult<Vec<ApiActivityHistory>> {
        validate_activity_id(activity_id)?;
        self.history_calls.lock().unwrap().push(activity_id);

        if self.failing_activities.contains(&activity_id) {
            return Err(RemoteError::Api {
                status: 500,
                message: format!("history for {activity_id} unavailable"),
            });
        }
        Ok(self.histories.get(&activity_id).cloned().unwrap_or_default())
    }
}

/// A set with `effort0` as weight (lb) and `effort1` as reps
pub fn weighted_set(
    id: i64,
    activity_id: i64,
    action_time: &str,
    reps: f64,
    weight: f64,
) -> ApiAction {
    ApiAction {
        id,
        action_time: action_time.to_string(),
        action_date: None,
        action_group_id: None,
        effort0: Some(weight),
        effort1: Some(reps),
        effort2: None,
        effort3: None,
        effort0_unit: Some(ApiEffort {
            id: 2,
            abbr: "lb".to_string(),
            name: "pounds".to_string(),
        }),
        effort1_unit: Some(ApiEffort {
            id: 31,
            abbr: "reps".to_string(),
            name: "reps".to_string(),
        }),
        effort2_unit: None,
        effort3_unit: None,
        activity: ApiActionActivity {
            id: activity_id,
            name: String::new(),
        },
    }
}

pub fn workout(group_id: i64, actions: Vec<ApiAction>) -> ApiActivityHistory {
    ApiActivityHistory {
        id: group_id,
        group_id: Some(group_id),
        points: None,
        name: Some("Workout".to_string()),
        time: None,
        original_time: None,
        actions,
    }
}
