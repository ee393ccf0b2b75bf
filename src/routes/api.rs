// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Day, TaskId, User, UserProfile, UserProgress};
pub use crate::models::{AuthUserResponse, CompleteTaskResponse, TaskEntry, TaskListResponse};
use crate::services::presenter::{present_day, DayDetailView};
use crate::time_utils::{now_rfc3339, parse_date};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, patch, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/user", get(get_auth_user))
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks/{task_id}/complete", patch(complete_task))
        .route("/api/days", get(list_days))
        .route("/api/days/{week}/{day}", get(get_day))
        .route("/api/profile", put(put_profile))
        .route("/api/progress/start", post(start_progress))
}

// ─── Auth Snapshot ───────────────────────────────────────────

/// Get the current user, provisioning the record on first sight.
async fn get_auth_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Json<AuthUserResponse> {
    let user = state.db.get_or_insert_user(User {
        id: auth.user_id.clone(),
        email: auth.email,
        first_name: auth.first_name.unwrap_or_default(),
        last_name: auth.last_name,
        is_morty_user: auth.is_morty_user,
        created_at: now_rfc3339(),
    });

    Json(AuthUserResponse {
        profile: state.db.get_profile(&auth.user_id),
        progress: state.db.get_progress(&auth.user_id),
        user,
    })
}

// ─── Tasks ───────────────────────────────────────────────────

/// List every curriculum task with the caller's completion flags.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Json<TaskListResponse> {
    let done = state.db.completed_tasks(&auth.user_id);

    let tasks = state
        .curriculum
        .tasks_in_order()
        .map(|(day, task)| TaskEntry {
            task: task.with_completion(done.contains(&task.id)),
            week: day.week,
            day: day.day,
        })
        .collect();

    Json(TaskListResponse { tasks })
}

/// Mark a task complete. Completing a finished task is a no-op.
async fn complete_task(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(task_id): Path<String>,
) -> Result<Json<CompleteTaskResponse>> {
    let task_id = TaskId::new(task_id);
    if task_id.is_empty() {
        return Err(AppError::BadRequest("Task id must not be empty".to_string()));
    }

    let task = state
        .curriculum
        .task(&task_id)
        .ok_or_else(|| AppError::NotFound(format!("Task {}", task_id)))?;

    let newly_completed = state.db.mark_completed(&auth.user_id, &task_id);
    if newly_completed {
        tracing::info!(user_id = %auth.user_id, task_id = %task_id, "Task completed");
    } else {
        tracing::debug!(user_id = %auth.user_id, task_id = %task_id, "Task already complete");
    }

    Ok(Json(CompleteTaskResponse {
        task: task.with_completion(true),
        already_completed: !newly_completed,
    }))
}

// ─── Days ────────────────────────────────────────────────────

fn with_user_completion(day: &Day, done: &HashSet<TaskId>) -> Day {
    Day {
        tasks: day
            .tasks
            .iter()
            .map(|t| t.with_completion(done.contains(&t.id)))
            .collect(),
        ..day.clone()
    }
}

/// Every day of the plan with estimates.
async fn list_days(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Json<Vec<DayDetailView>> {
    let done = state.db.completed_tasks(&auth.user_id);

    let days = state
        .curriculum
        .days()
        .iter()
        .filter_map(|day| present_day(Some(&with_user_completion(day, &done))))
        .collect();

    Json(days)
}

/// Detail view of one day.
async fn get_day(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((week, day)): Path<(u32, u32)>,
) -> Result<Json<DayDetailView>> {
    let done = state.db.completed_tasks(&auth.user_id);
    let day_with_completion = state
        .curriculum
        .day(week, day)
        .map(|d| with_user_completion(d, &done));

    present_day(day_with_completion.as_ref())
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Week {} day {}", week, day)))
}

// ─── Profile & Progress ──────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 100))]
    role: String,
    #[validate(length(max = 100))]
    team: Option<String>,
    start_date: Option<String>,
}

/// Complete or edit the caller's profile.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<UserProfile>> {
    request.validate()?;
    if request.role.trim().is_empty() {
        return Err(AppError::BadRequest("Role must not be blank".to_string()));
    }

    if let Some(raw) = request.start_date.as_deref() {
        if parse_date(raw).is_none() {
            return Err(AppError::BadRequest(
                "Invalid 'start_date': must be YYYY-MM-DD".to_string(),
            ));
        }
    }

    let profile = UserProfile {
        user_id: auth.user_id.clone(),
        role: request.role.trim().to_string(),
        team: request.team.filter(|t| !t.trim().is_empty()),
        start_date: request.start_date,
        updated_at: now_rfc3339(),
    };

    let created = state.db.upsert_profile(&profile);
    tracing::info!(user_id = %auth.user_id, created, "Profile saved");

    Ok(Json(profile))
}

/// Begin onboarding. Calling again returns the existing progress.
async fn start_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Json<UserProgress> {
    Json(state.db.start_progress(&auth.user_id, &now_rfc3339()))
}
