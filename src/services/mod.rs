// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod curriculum;
pub mod presenter;

pub use curriculum::{CurriculumError, CurriculumService};
pub use presenter::{compute_total_estimate, present_day, DayDetailView, TimeEstimate};
