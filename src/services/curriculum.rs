// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Curriculum loading and lookup service.

use crate::models::{Day, Task, TaskId};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// On-disk curriculum document.
#[derive(Deserialize)]
struct CurriculumFile {
    days: Vec<Day>,
}

/// Service holding the day-by-day plan and a task index.
#[derive(Default, Clone)]
pub struct CurriculumService {
    days: Vec<Day>,
    tasks: HashMap<TaskId, (usize, usize)>,
}

impl CurriculumService {
    /// Load the curriculum from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CurriculumError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CurriculumError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the curriculum from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, CurriculumError> {
        let file: CurriculumFile =
            serde_json::from_str(json_data).map_err(|e| CurriculumError::Parse(e.to_string()))?;
        Self::from_days(file.days)
    }

    /// Build the service from already-parsed days, validating the plan.
    pub fn from_days(mut days: Vec<Day>) -> Result<Self, CurriculumError> {
        // Plan order is week then day; tasks inside a day keep authoring order.
        days.sort_by_key(Day::key);

        let mut seen_days = HashSet::new();
        let mut tasks = HashMap::new();

        for (day_index, day) in days.iter_mut().enumerate() {
            if day.week == 0 || day.day == 0 {
                return Err(CurriculumError::Invalid(format!(
                    "week and day numbers are 1-based (got week {} day {})",
                    day.week, day.day
                )));
            }
            if !seen_days.insert(day.key()) {
                return Err(CurriculumError::Invalid(format!(
                    "duplicate entry for week {} day {}",
                    day.week, day.day
                )));
            }

            for (task_index, task) in day.tasks.iter_mut().enumerate() {
                if task.id.is_empty() {
                    return Err(CurriculumError::Invalid(format!(
                        "task {} of week {} day {} has an empty id",
                        task_index + 1,
                        day.week,
                        day.day
                    )));
                }
                // Completion is per user; the plan itself is always incomplete.
                task.completed = false;
                if tasks
                    .insert(task.id.clone(), (day_index, task_index))
                    .is_some()
                {
                    return Err(CurriculumError::Invalid(format!(
                        "duplicate task id {}",
                        task.id
                    )));
                }
            }
        }

        tracing::info!(days = days.len(), tasks = tasks.len(), "Loaded curriculum");
        Ok(Self { days, tasks })
    }

    /// All days in plan order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Look up a single day.
    pub fn day(&self, week: u32, day: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.week == week && d.day == day)
    }

    /// Look up a task definition by id.
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks
            .get(id)
            .map(|&(day_index, task_index)| &self.days[day_index].tasks[task_index])
    }

    /// Every task in plan order, paired with its day.
    pub fn tasks_in_order(&self) -> impl Iterator<Item = (&Day, &Task)> {
        self.days
            .iter()
            .flat_map(|day| day.tasks.iter().map(move |task| (day, task)))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

/// Curriculum loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid curriculum: {0}")]
    Invalid(String),
}
