// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task completion controller.
//!
//! Each task moves through `Idle → Pending → (Succeeded | Failed) → Idle`.
//! A successful completion holds the task in `Succeeded` for a short settle
//! delay (so the completion animation can play), then returns it to `Idle`
//! and invalidates the cached task list. Failures return to `Idle` at once.
//!
//! The settle transition runs on a spawned timer that is cancelled by
//! [`TaskCompletionController::teardown`]. Whether the timer fires or is
//! cancelled, the task list is invalidated exactly once per successful
//! completion.

use crate::client::api::{ClientError, TaskStore};
use crate::client::cache::{keys, SharedQueryCache};
use crate::models::{CompleteTaskResponse, TaskId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

/// How long a completed task stays in the "completing" state.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

pub const TASK_COMPLETED_TITLE: &str = "Task completed!";
pub const TASK_FAILED_TITLE: &str = "Failed to complete task";

/// Per-task completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPhase {
    Idle,
    /// Request in flight
    Pending,
    /// Request succeeded; waiting for the settle delay
    Succeeded,
    /// Request failed; transient, immediately followed by `Idle`
    Failed,
}

impl CompletionPhase {
    /// The task shows the "completing" visual state.
    pub fn is_completing(self) -> bool {
        matches!(self, CompletionPhase::Pending | CompletionPhase::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

/// User-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: &str, description: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant: ToastVariant::Success,
        }
    }

    pub fn error(title: &str, description: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant: ToastVariant::Error,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Task id must not be empty")]
    InvalidTaskId,

    #[error("Completion already in progress for task {0}")]
    AlreadyInFlight(TaskId),

    #[error("Failed to complete task {task_id}: {source}")]
    Store {
        task_id: TaskId,
        #[source]
        source: ClientError,
    },
}

impl CompletionError {
    /// Whether the user should be offered a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Store { source, .. } => source.is_retryable(),
            CompletionError::InvalidTaskId | CompletionError::AlreadyInFlight(_) => false,
        }
    }
}

fn log_transition(task_id: &TaskId, from: CompletionPhase, to: CompletionPhase) {
    tracing::debug!(task_id = %task_id, ?from, ?to, "Completion phase");
}

struct Inner {
    store: Arc<dyn TaskStore>,
    cache: SharedQueryCache,
    toasts: UnboundedSender<Toast>,
    /// Non-idle tasks only; absence means `Idle`
    phases: DashMap<TaskId, CompletionPhase>,
    /// Scheduled settle transitions. Whoever removes an entry owns the
    /// invalidation for that completion.
    settles: DashMap<TaskId, Option<AbortHandle>>,
    torn_down: AtomicBool,
}

impl Inner {
    /// Idle to Pending, atomically. False if the task is not idle.
    fn begin(&self, task_id: &TaskId) -> bool {
        match self.phases.entry(task_id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(CompletionPhase::Pending);
                log_transition(task_id, CompletionPhase::Idle, CompletionPhase::Pending);
                true
            }
        }
    }

    fn transition(&self, task_id: &TaskId, to: CompletionPhase) {
        let from = self.phase(task_id);
        if to == CompletionPhase::Idle {
            self.phases.remove(task_id);
        } else {
            self.phases.insert(task_id.clone(), to);
        }
        log_transition(task_id, from, to);
    }

    fn phase(&self, task_id: &TaskId) -> CompletionPhase {
        self.phases
            .get(task_id)
            .map(|p| *p)
            .unwrap_or(CompletionPhase::Idle)
    }

    fn toast(&self, toast: Toast) {
        // Nobody listening is fine
        let _ = self.toasts.send(toast);
    }

    fn invalidate_tasks(&self) {
        self.cache.invalidate(keys::TASKS);
    }

    /// Settle timer body.
    fn settle(&self, task_id: &TaskId) {
        if self.settles.remove(task_id).is_none() {
            // Cancelled by teardown, which already invalidated
            return;
        }
        self.transition(task_id, CompletionPhase::Idle);
        self.invalidate_tasks();
    }
}

/// Completes tasks against the store and keeps the cached task list in sync.
pub struct TaskCompletionController {
    inner: Arc<Inner>,
    settle_delay: Duration,
}

impl TaskCompletionController {
    pub fn new(
        store: Arc<dyn TaskStore>,
        cache: SharedQueryCache,
        toasts: UnboundedSender<Toast>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                cache,
                toasts,
                phases: DashMap::new(),
                settles: DashMap::new(),
                torn_down: AtomicBool::new(false),
            }),
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn phase(&self, task_id: &TaskId) -> CompletionPhase {
        self.inner.phase(task_id)
    }

    /// Whether the task is showing the "completing" state.
    pub fn is_completing(&self, task_id: &TaskId) -> bool {
        self.phase(task_id).is_completing()
    }

    /// Mark a task complete.
    ///
    /// Returns once the store has answered. The settle transition and the
    /// task list invalidation happen `settle_delay` later. A second call for
    /// a task that is still completing is rejected without a request.
    pub async fn complete_task(
        &self,
        task_id: impl Into<TaskId>,
    ) -> Result<CompleteTaskResponse, CompletionError> {
        let task_id = task_id.into();
        if task_id.is_empty() {
            return Err(CompletionError::InvalidTaskId);
        }

        if !self.inner.begin(&task_id) {
            tracing::debug!(task_id = %task_id, "Ignoring duplicate completion");
            return Err(CompletionError::AlreadyInFlight(task_id));
        }

        match self.inner.store.complete_task(&task_id).await {
            Ok(response) => {
                if self.inner.torn_down.load(Ordering::Acquire) {
                    // No view left to animate; still refresh the list
                    self.inner.transition(&task_id, CompletionPhase::Idle);
                    self.inner.invalidate_tasks();
                    return Ok(response);
                }

                self.inner.transition(&task_id, CompletionPhase::Succeeded);
                tracing::info!(
                    task_id = %task_id,
                    already_completed = response.already_completed,
                    "Task completed"
                );
                self.inner.toast(Toast::success(
                    TASK_COMPLETED_TITLE,
                    Some(response.task.title.clone()),
                ));
                self.schedule_settle(task_id);
                Ok(response)
            }
            Err(source) => {
                self.inner.transition(&task_id, CompletionPhase::Failed);
                self.inner.transition(&task_id, CompletionPhase::Idle);

                let retryable = source.is_retryable();
                tracing::warn!(task_id = %task_id, error = %source, retryable, "Task completion failed");
                let hint = if retryable {
                    "Please try again."
                } else {
                    "This task could not be completed."
                };
                self.inner
                    .toast(Toast::error(TASK_FAILED_TITLE, Some(hint.to_string())));

                Err(CompletionError::Store { task_id, source })
            }
        }
    }

    fn schedule_settle(&self, task_id: TaskId) {
        // Register before spawning so a zero delay cannot race the insert.
        self.inner.settles.insert(task_id.clone(), None);

        let inner = self.inner.clone();
        let delay = self.settle_delay;
        let timer_task_id = task_id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.settle(&timer_task_id);
        });

        if let Some(mut slot) = self.inner.settles.get_mut(&task_id) {
            *slot = Some(handle.abort_handle());
        }
    }

    /// Number of settle transitions still scheduled.
    pub fn pending_settles(&self) -> usize {
        self.inner.settles.len()
    }

    /// Cancel all scheduled settle transitions.
    ///
    /// Each cancelled completion still invalidates the task list, so the
    /// next read reflects the server. Requests still in flight keep their
    /// `Pending` phase until the store answers, so duplicates stay
    /// rejected. Runs automatically on drop.
    pub fn teardown(&self) {
        if self.inner.torn_down.swap(true, Ordering::AcqRel) {
            return;
        }

        let task_ids: Vec<TaskId> = self.inner.settles.iter().map(|e| e.key().clone()).collect();
        let mut cancelled = 0;
        for task_id in task_ids {
            if let Some((_, handle)) = self.inner.settles.remove(&task_id) {
                if let Some(handle) = handle {
                    handle.abort();
                }
                self.inner.phases.remove(&task_id);
                self.inner.invalidate_tasks();
                cancelled += 1;
            }
        }

        tracing::debug!(cancelled, "Completion controller torn down");
    }
}

impl Drop for TaskCompletionController {
    fn drop(&mut self) {
        self.teardown();
    }
}
