// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the Task Store API.

use crate::models::{AuthUserResponse, CompleteTaskResponse, TaskId, TaskListResponse};
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

/// Errors from Task Store requests.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status == 429 || *status >= 500,
            ClientError::Unauthorized | ClientError::NotFound(_) | ClientError::Decode(_) => false,
        }
    }
}

/// Task mutations and the task list.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// `PATCH /api/tasks/{task_id}/complete`
    async fn complete_task(&self, task_id: &TaskId) -> Result<CompleteTaskResponse, ClientError>;

    /// `GET /api/tasks`
    async fn list_tasks(&self) -> Result<TaskListResponse, ClientError>;
}

/// Source of the combined user/profile/progress read.
#[async_trait]
pub trait AuthSource: Send + Sync {
    /// `GET /api/auth/user`
    async fn fetch_auth_user(&self) -> Result<AuthUserResponse, ClientError>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<(), ClientError>;
}

/// Task Store API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Transport(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "Invalid base URL {}",
                base_url
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        })
    }

    /// Send the session token as a bearer token on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(segments);
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%method, %url, "Task Store request");

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::check_response(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<T, ClientError> {
        self.send(method, segments)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Check response status, passing successful responses through.
    async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 => ClientError::Unauthorized,
            404 => ClientError::NotFound(body),
            code => {
                if code == 429 || code >= 500 {
                    tracing::warn!(status = code, "Task Store request failed");
                }
                ClientError::Status { status: code, body }
            }
        })
    }
}

#[async_trait]
impl TaskStore for ApiClient {
    async fn complete_task(&self, task_id: &TaskId) -> Result<CompleteTaskResponse, ClientError> {
        self.send_json(
            Method::PATCH,
            &["api", "tasks", task_id.as_str(), "complete"],
        )
        .await
    }

    async fn list_tasks(&self) -> Result<TaskListResponse, ClientError> {
        self.send_json(Method::GET, &["api", "tasks"]).await
    }
}

#[async_trait]
impl AuthSource for ApiClient {
    async fn fetch_auth_user(&self) -> Result<AuthUserResponse, ClientError> {
        self.send_json(Method::GET, &["api", "auth", "user"]).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.send(Method::POST, &["auth", "logout"]).await?;
        Ok(())
    }
}
