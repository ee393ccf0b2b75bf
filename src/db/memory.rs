// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for users, profiles, progress and task completion.
//!
//! Task definitions live in the curriculum; the store only records which
//! tasks each user has completed, so a task's duration and category can
//! never be changed by a completion.

use crate::models::{TaskId, User, UserProfile, UserProgress};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Store handle. Clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, User>>,
    profiles: Arc<DashMap<String, UserProfile>>,
    progress: Arc<DashMap<String, UserProgress>>,
    /// Completed task ids per user
    completions: Arc<DashMap<String, HashSet<TaskId>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.clone())
    }

    /// Return the stored user, inserting `user` first if none exists.
    pub fn get_or_insert_user(&self, user: User) -> User {
        let entry = self.users.entry(user.id.clone()).or_insert_with(|| {
            tracing::info!(user_id = %user.id, "Provisioned new user");
            user
        });
        entry.clone()
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub fn get_profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.get(user_id).map(|p| p.clone())
    }

    /// Create or replace a user's profile. Returns true if it was created.
    pub fn upsert_profile(&self, profile: &UserProfile) -> bool {
        self.profiles
            .insert(profile.user_id.clone(), profile.clone())
            .is_none()
    }

    // ─── Progress Operations ─────────────────────────────────────

    pub fn get_progress(&self, user_id: &str) -> Option<UserProgress> {
        self.progress.get(user_id).map(|p| p.clone())
    }

    /// Begin onboarding at week 1 day 1 unless it has already begun.
    pub fn start_progress(&self, user_id: &str, now: &str) -> UserProgress {
        self.progress
            .entry(user_id.to_string())
            .or_insert_with(|| UserProgress {
                user_id: user_id.to_string(),
                current_week: 1,
                current_day: 1,
                started_at: now.to_string(),
            })
            .clone()
    }

    // ─── Completion Operations ───────────────────────────────────

    /// Task ids the user has completed.
    pub fn completed_tasks(&self, user_id: &str) -> HashSet<TaskId> {
        self.completions
            .get(user_id)
            .map(|set| set.clone())
            .unwrap_or_default()
    }

    pub fn is_completed(&self, user_id: &str, task_id: &TaskId) -> bool {
        self.completions
            .get(user_id)
            .is_some_and(|set| set.contains(task_id))
    }

    /// Record a completion.
    ///
    /// Returns `false` if the task was already complete (no-op).
    pub fn mark_completed(&self, user_id: &str, task_id: &TaskId) -> bool {
        self.completions
            .entry(user_id.to_string())
            .or_default()
            .insert(task_id.clone())
    }
}
