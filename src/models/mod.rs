// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod api;
pub mod day;
pub mod task;
pub mod user;

pub use api::{AuthUserResponse, CompleteTaskResponse, TaskEntry, TaskListResponse};
pub use day::Day;
pub use task::{Task, TaskCategory, TaskId};
pub use user::{User, UserProfile, UserProgress};
