// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side core used by the web app against the Task Store API.

pub mod api;
pub mod auth;
pub mod cache;
pub mod completion;
pub mod expansion;
pub mod tasks;

pub use api::{ApiClient, AuthSource, ClientError, TaskStore};
pub use auth::{AuthContextReader, AuthSnapshot, AuthStatus};
pub use cache::{QueryCache, SharedQueryCache};
pub use completion::{
    CompletionError, CompletionPhase, TaskCompletionController, Toast, ToastVariant,
};
pub use expansion::ExpansionState;
pub use tasks::TaskListQuery;
