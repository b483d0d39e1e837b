// ABOUTME: External data source abstraction for the training log
// ABOUTME: Trait seam plus wire payload types shared by REST and local implementations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Sources
//!
//! The store talks to exactly one collaborator: something that persists set
//! records. [`ExerciseDataSource`] is that seam. [`rest::RestSource`] speaks
//! to the HTTP backend; [`local::LocalSource`] is the file-backed fallback
//! for running without one.

use async_trait::async_trait;
use chrono::NaiveDate;
use liftlog_core::models::{SetDraft, SetKey};
use liftlog_core::AppResult;
use serde::Serialize;
use serde_json::Value;

pub mod http_client;
pub mod local;
pub mod rest;

pub use local::LocalSource;
pub use rest::RestSource;

/// Wire body for creating a set.
///
/// Optional fields serialize as explicit `null` - the backend distinguishes
/// "not tracked" from zero by the null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSetPayload {
    /// Exercise name
    pub exercise: String,
    /// Set ordinal
    pub set: u32,
    /// Load
    pub weight: f64,
    /// Repetitions
    pub reps: u32,
    /// Reps in reserve, `null` when untracked
    pub rir: Option<u32>,
    /// Date override, `null` lets the backend assign today
    pub date: Option<NaiveDate>,
}

impl From<SetDraft> for NewSetPayload {
    fn from(draft: SetDraft) -> Self {
        Self {
            exercise: draft.exercise,
            set: draft.set,
            weight: draft.weight,
            reps: draft.reps,
            rir: draft.rir,
            date: draft.date,
        }
    }
}

/// Wire body for a partial update: identity plus only the changed fields.
///
/// `rir` is doubly optional: absent means untouched, `null` clears the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateSetPayload {
    /// Exercise name, identity
    pub exercise: String,
    /// Set ordinal, identity
    pub set: u32,
    /// Date, identity
    pub date: Option<NaiveDate>,
    /// New load, absent when unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// New repetitions, absent when unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// RIR change, absent when unchanged, `null` to clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rir: Option<Option<u32>>,
}

impl UpdateSetPayload {
    /// Identity-only payload with no field changes yet
    #[must_use]
    pub fn identity(key: &SetKey) -> Self {
        Self {
            exercise: key.exercise.clone(),
            set: key.set,
            date: key.date,
            weight: None,
            reps: None,
            rir: None,
        }
    }

    /// Whether the payload carries no changed field
    #[must_use]
    pub fn has_no_changes(&self) -> bool {
        self.weight.is_none() && self.reps.is_none() && self.rir.is_none()
    }
}

/// The persistence collaborator behind the session store.
///
/// Mutation methods are fire-and-forget from the store's perspective; the
/// store re-fetches after every successful write rather than trusting a
/// response body.
#[async_trait]
pub trait ExerciseDataSource: Send + Sync {
    /// Create an account
    async fn register(&self, username: &str, password: &str) -> AppResult<()>;

    /// Check credentials. Rejected credentials are `Ok(false)`, not an error.
    async fn login(&self, username: &str, password: &str) -> AppResult<bool>;

    /// Persist a new set
    async fn save_set(&self, username: &str, set: &NewSetPayload) -> AppResult<()>;

    /// Apply a partial update to an existing set
    async fn update_set(&self, username: &str, update: &UpdateSetPayload) -> AppResult<()>;

    /// Fetch every record for the user, in any shape normalization accepts
    async fn fetch_all(&self, username: &str) -> AppResult<Value>;

    /// Fetch the records performed today, same shape contract as `fetch_all`
    async fn fetch_today(&self, username: &str) -> AppResult<Value>;
}
