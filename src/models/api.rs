// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and response bodies shared by the API routes and the client.

use crate::models::{Task, User, UserProfile, UserProgress};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Combined user/profile/progress read.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthUserResponse {
    pub user: User,
    pub profile: Option<UserProfile>,
    pub progress: Option<UserProgress>,
}

/// A task with the day it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TaskEntry {
    #[serde(flatten)]
    pub task: Task,
    pub week: u32,
    pub day: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompleteTaskResponse {
    pub task: Task,
    /// The task was already complete; nothing changed
    pub already_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskCategory, TaskId};

    #[test]
    fn test_task_entry_flattens_task() {
        let entry = TaskEntry {
            task: Task {
                id: TaskId::new("t1"),
                title: "Meet your buddy".to_string(),
                description: None,
                category: TaskCategory::Meeting,
                estimated_minutes: 30,
                completed: true,
            },
            week: 1,
            day: 3,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "t1");
        assert_eq!(json["category"], "meeting");
        assert_eq!(json["completed"], true);
        assert_eq!(json["week"], 1);

        let back: TaskEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
