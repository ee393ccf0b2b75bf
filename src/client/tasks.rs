// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached task list read.

use crate::client::api::{ClientError, TaskStore};
use crate::client::cache::{keys, SharedQueryCache};
use crate::models::{TaskEntry, TaskListResponse};
use std::sync::Arc;

/// Reads `/api/tasks` through the query cache.
///
/// After the completion controller invalidates the key, the next
/// [`TaskListQuery::fetch`] goes back to the store.
pub struct TaskListQuery {
    store: Arc<dyn TaskStore>,
    cache: SharedQueryCache,
}

impl TaskListQuery {
    pub fn new(store: Arc<dyn TaskStore>, cache: SharedQueryCache) -> Self {
        Self { store, cache }
    }

    pub async fn fetch(&self) -> Result<Vec<TaskEntry>, ClientError> {
        if let Some(cached) = self.cache.get_as::<TaskListResponse>(keys::TASKS) {
            return Ok(cached.tasks);
        }

        let response = self.store.list_tasks().await?;
        if let Err(e) = self.cache.set_as(keys::TASKS, &response) {
            tracing::warn!(error = %e, "Failed to cache task list");
        }
        tracing::debug!(count = response.tasks.len(), "Task list fetched");
        Ok(response.tasks)
    }

    /// Tasks not yet completed, in plan order.
    pub async fn pending(&self) -> Result<Vec<TaskEntry>, ClientError> {
        Ok(self
            .fetch()
            .await?
            .into_iter()
            .filter(|entry| !entry.task.completed)
            .collect())
    }
}
