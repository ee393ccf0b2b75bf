// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RampLO Task Store API Server
//!
//! Serves the onboarding curriculum and records per-user task completion.

use ramplo::{config::Config, db::MemoryDb, services::CurriculumService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting RampLO API");

    // Load curriculum
    tracing::info!(path = %config.curriculum_path, "Loading curriculum");
    let curriculum = CurriculumService::load_from_file(&config.curriculum_path)?;
    tracing::info!(
        days = curriculum.days().len(),
        tasks = curriculum.task_count(),
        "Curriculum loaded"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db: MemoryDb::new(),
        curriculum,
    });

    // Build router
    let app = ramplo::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ramplo=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
