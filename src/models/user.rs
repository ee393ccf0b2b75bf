// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User, profile and progress models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Identity record, owned by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Identity provider subject (also the store key)
    pub id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    /// Account originated from the Morty integration
    #[serde(default)]
    pub is_morty_user: bool,
    /// When the user was first seen (RFC 3339)
    pub created_at: String,
}

/// Profile data, absent until the user completes profile setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub user_id: String,
    pub role: String,
    pub team: Option<String>,
    /// First working day (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    pub updated_at: String,
}

/// Onboarding progress snapshot, absent until onboarding begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProgress {
    pub user_id: String,
    pub current_week: u32,
    pub current_day: u32,
    pub started_at: String,
}
