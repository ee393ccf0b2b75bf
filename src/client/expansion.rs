// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Which task row is expanded. At most one at a time.

use crate::models::TaskId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: Option<TaskId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse `task_id` if it is expanded, otherwise expand it (collapsing
    /// whichever task was expanded before). Returns whether it is now expanded.
    pub fn toggle_expand(&mut self, task_id: &TaskId) -> bool {
        if self.expanded.as_ref() == Some(task_id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(task_id.clone());
            true
        }
    }

    pub fn is_expanded(&self, task_id: &TaskId) -> bool {
        self.expanded.as_ref() == Some(task_id)
    }

    pub fn expanded(&self) -> Option<&TaskId> {
        self.expanded.as_ref()
    }
}
