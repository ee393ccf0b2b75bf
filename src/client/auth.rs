// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth context reader: the current user, profile and progress as one read.

use crate::client::api::{AuthSource, ClientError};
use crate::client::cache::{keys, SharedQueryCache};
use crate::models::{AuthUserResponse, User, UserProfile, UserProgress};
use std::sync::Arc;

/// Outcome of the last auth fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// No fetch has resolved yet
    Loading,
    Authenticated,
    /// The server rejected the session; send the user to sign in
    Unauthenticated,
    /// Network or server failure; offer a retry instead of a sign-in redirect
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub profile: Option<UserProfile>,
    pub progress: Option<UserProgress>,
    pub is_loading: bool,
    pub status: AuthStatus,
}

impl AuthSnapshot {
    /// State before the first fetch resolves.
    pub fn loading() -> Self {
        Self::without_user(AuthStatus::Loading)
    }

    fn without_user(status: AuthStatus) -> Self {
        Self {
            user: None,
            profile: None,
            progress: None,
            is_loading: status == AuthStatus::Loading,
            status,
        }
    }

    fn from_response(response: AuthUserResponse) -> Self {
        Self {
            user: Some(response.user),
            profile: response.profile,
            progress: response.progress,
            is_loading: false,
            status: AuthStatus::Authenticated,
        }
    }

    fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Unauthorized => Self::without_user(AuthStatus::Unauthenticated),
            other => Self::without_user(AuthStatus::FetchFailed(other.to_string())),
        }
    }

    /// True iff a user is present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True iff the user came through the Morty integration. False without a user.
    pub fn is_morty_user(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_morty_user)
    }
}

/// Reads the auth snapshot through the query cache.
pub struct AuthContextReader {
    source: Arc<dyn AuthSource>,
    cache: SharedQueryCache,
}

impl AuthContextReader {
    pub fn new(source: Arc<dyn AuthSource>, cache: SharedQueryCache) -> Self {
        Self { source, cache }
    }

    /// Current snapshot.
    ///
    /// Served from the cache when fresh. Otherwise performs exactly one
    /// request, with no retry. Only successful reads are cached.
    pub async fn get_auth_snapshot(&self) -> AuthSnapshot {
        if let Some(cached) = self.cache.get_as::<AuthUserResponse>(keys::AUTH_USER) {
            return AuthSnapshot::from_response(cached);
        }

        match self.source.fetch_auth_user().await {
            Ok(response) => {
                if let Err(e) = self.cache.set_as(keys::AUTH_USER, &response) {
                    tracing::warn!(error = %e, "Failed to cache auth snapshot");
                }
                tracing::debug!(user_id = %response.user.id, "Auth snapshot loaded");
                AuthSnapshot::from_response(response)
            }
            Err(e) => {
                match &e {
                    ClientError::Unauthorized => tracing::debug!("No active session"),
                    other => tracing::warn!(error = %other, "Auth snapshot fetch failed"),
                }
                AuthSnapshot::from_error(&e)
            }
        }
    }

    /// Forget the cached snapshot so the next read refetches.
    pub fn invalidate(&self) {
        self.cache.invalidate(keys::AUTH_USER);
    }

    /// End the session and drop every cached read.
    ///
    /// The cache is cleared even when the server call fails, so no data from
    /// the old session is served afterwards.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let result = self.source.logout().await;
        self.cache.clear();

        match &result {
            Ok(()) => tracing::info!("Signed out"),
            Err(e) => tracing::warn!(error = %e, "Logout request failed"),
        }
        result
    }
}
