// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes. Sign-in itself happens at the identity provider.

use crate::config::SESSION_COOKIE;
use crate::AppState;
use axum::{http::StatusCode, routing::post, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/logout", post(logout))
}

/// Drop the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let had_session = jar.get(SESSION_COOKIE).is_some();
    tracing::info!(had_session, "Logout");

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}
