// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Day detail projection: objective, tasks and a total time estimate.

use crate::models::{Day, Task};
use serde::Serialize;
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Total estimated time for a day, split into hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TimeEstimate {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_minutes: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub hours: u64,
    pub minutes: u32,
}

impl TimeEstimate {
    pub fn from_minutes(total_minutes: u64) -> Self {
        Self {
            total_minutes,
            hours: total_minutes / 60,
            minutes: (total_minutes % 60) as u32,
        }
    }
}

/// `"1h 5m"`, or `"25m"` when there is no whole hour.
impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{}h {}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

/// Sum of the day's task estimates.
pub fn compute_total_estimate(day: &Day) -> TimeEstimate {
    TimeEstimate::from_minutes(total_minutes(&day.tasks))
}

fn total_minutes(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| u64::from(t.estimated_minutes)).sum()
}

/// Read-only view of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayDetailView {
    pub week: u32,
    pub day: u32,
    pub objective: String,
    pub week_theme: String,
    pub tasks: Vec<Task>,
    pub extra_time_activity: String,
    pub estimate: TimeEstimate,
    /// Preformatted estimate, e.g. "1h 5m"
    pub estimate_display: String,
}

/// Project a day into its detail view.
///
/// An absent day renders nothing.
pub fn present_day(day: Option<&Day>) -> Option<DayDetailView> {
    let day = day?;
    let estimate = compute_total_estimate(day);

    Some(DayDetailView {
        week: day.week,
        day: day.day,
        objective: day.objective.clone(),
        week_theme: day.week_theme.clone(),
        tasks: day.tasks.clone(),
        extra_time_activity: day.extra_time_activity.clone(),
        estimate,
        estimate_display: estimate.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskCategory, TaskId};

    fn day_with(durations: &[u32]) -> Day {
        Day {
            week: 1,
            day: 1,
            objective: "Get oriented".to_string(),
            week_theme: "Foundations".to_string(),
            extra_time_activity: "Explore the codebase".to_string(),
            tasks: durations
                .iter()
                .enumerate()
                .map(|(i, &minutes)| Task {
                    id: TaskId::new(format!("t{}", i + 1)),
                    title: format!("Task {}", i + 1),
                    description: None,
                    category: TaskCategory::Learning,
                    estimated_minutes: minutes,
                    completed: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_hours_and_minutes() {
        let estimate = compute_total_estimate(&day_with(&[25, 40]));
        assert_eq!(estimate.total_minutes, 65);
        assert_eq!(estimate.hours, 1);
        assert_eq!(estimate.minutes, 5);
        assert_eq!(estimate.to_string(), "1h 5m");
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(compute_total_estimate(&day_with(&[10, 15])).to_string(), "25m");
    }

    #[test]
    fn test_empty_day_shows_zero_minutes() {
        assert_eq!(compute_total_estimate(&day_with(&[])).to_string(), "0m");
    }

    #[test]
    fn test_whole_hours_keep_zero_minutes() {
        assert_eq!(compute_total_estimate(&day_with(&[60, 60])).to_string(), "2h 0m");
    }

    #[test]
    fn test_sum_does_not_overflow_u32() {
        let estimate = compute_total_estimate(&day_with(&[u32::MAX, u32::MAX]));
        assert_eq!(estimate.total_minutes, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_matches_floor_and_mod_for_many_totals() {
        for a in (0..200).step_by(7) {
            for b in (0..200).step_by(13) {
                let estimate = compute_total_estimate(&day_with(&[a, b]));
                let total = u64::from(a + b);
                assert_eq!(estimate.hours, total / 60);
                assert_eq!(u64::from(estimate.minutes), total % 60);
            }
        }
    }

    #[test]
    fn test_absent_day_renders_nothing() {
        assert!(present_day(None).is_none());
    }

    #[test]
    fn test_present_day_keeps_task_order() {
        let day = day_with(&[5, 50, 10]);
        let view = present_day(Some(&day)).unwrap();

        let ids: Vec<_> = view.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(view.estimate_display, "1h 5m");
        assert_eq!(view.objective, "Get oriented");
        assert_eq!(view.extra_time_activity, "Explore the codebase");
    }
}
