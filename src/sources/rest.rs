// ABOUTME: REST implementation of the exercise data source
// ABOUTME: JSON bodies against the fixed-base-URL backend, usernames path-escaped
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::http_client::shared_client;
use super::{ExerciseDataSource, NewSetPayload, UpdateSetPayload};
use crate::constants::env_config;
use async_trait::async_trait;
use liftlog_core::{AppError, AppResult};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Data source backed by the remote persistence API
pub struct RestSource {
    base_url: String,
    client: &'static Client,
}

impl Default for RestSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RestSource {
    /// Source against the configured base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(env_config::api_base_url())
    }

    /// Source against an explicit base URL
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: shared_client(),
        }
    }

    fn exercises_path(&self, username: &str) -> String {
        format!("{}/exercises/{}", self.base_url, urlencoding::encode(username))
    }

    /// Send a request and apply the backend's response convention: non-2xx
    /// fails with the body text (or the status reason when the body is
    /// empty); 2xx parses as JSON, degrading to `null` for empty bodies.
    async fn execute(&self, request: RequestBuilder) -> AppResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::external_service("request failed").with_source(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::external_service("failed to read response body").with_source(e))?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            } else {
                body
            };
            return Err(AppError::external_service(message));
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ExerciseDataSource for RestSource {
    async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        debug!("registering '{username}'");
        let request = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(&json!({"username": username, "password": password}));
        self.execute(request).await.map(|_| ())
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<bool> {
        let request = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&json!({"username": username, "password": password}));
        // Bad credentials and transport failures both collapse to `false`;
        // the latter leave a breadcrumb for diagnosis.
        match self.execute(request).await {
            Ok(_) => Ok(true),
            Err(err) => {
                warn!("login for '{username}' failed: {err}");
                Ok(false)
            }
        }
    }

    async fn save_set(&self, username: &str, set: &NewSetPayload) -> AppResult<()> {
        let request = self.client.post(self.exercises_path(username)).json(set);
        self.execute(request).await.map(|_| ())
    }

    async fn update_set(&self, username: &str, update: &UpdateSetPayload) -> AppResult<()> {
        let request = self
            .client
            .patch(self.exercises_path(username))
            .json(update);
        self.execute(request).await.map(|_| ())
    }

    async fn fetch_all(&self, username: &str) -> AppResult<Value> {
        self.execute(self.client.get(self.exercises_path(username)))
            .await
    }

    async fn fetch_today(&self, username: &str) -> AppResult<Value> {
        let url = format!("{}/today", self.exercises_path(username));
        self.execute(self.client.get(url)).await
    }
}
