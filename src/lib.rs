// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RampLO: day-by-day onboarding curriculum with task tracking.
//!
//! This crate provides the task store API served to the web app, plus the
//! client-side core that talks to it: a query cache, the task completion
//! controller, the auth context reader and the day detail presenter.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::CurriculumService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub curriculum: CurriculumService,
}
