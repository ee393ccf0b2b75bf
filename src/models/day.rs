// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Curriculum day model.

use crate::models::task::Task;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One day of the curriculum.
///
/// Tasks are kept in authoring order and are never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Day {
    /// Week number (1-based)
    pub week: u32,
    /// Day number within the week (1-based)
    pub day: u32,
    pub objective: String,
    pub week_theme: String,
    /// Supplemental activity for users who finish early
    pub extra_time_activity: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Day {
    /// Key used to look a day up within the plan.
    pub fn key(&self) -> (u32, u32) {
        (self.week, self.day)
    }
}
