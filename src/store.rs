// ABOUTME: Session-scoped store owning the in-memory record collection
// ABOUTME: Mediates all mutation through the data source; server is the sole source of truth
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Session Store
//!
//! One store per active session, constructed over a data source - no ambient
//! globals. The collection is only ever replaced wholesale by a successful
//! load; writes go to the source first and a re-load resynchronizes, so a
//! failed write leaves the collection untouched.
//!
//! Mutations are not reentrant-safe against overlapping calls: a second
//! `add_set` issued before the first's resynchronizing load completes can
//! have its intermediate state overwritten by the later load's full
//! replacement. Callers serialize user-triggered mutations. What *is*
//! guarded is the session boundary: login and logout bump an epoch that an
//! in-flight load re-checks before committing, so a stale response for a
//! previous user never overwrites the next user's collection.

use crate::analysis;
use crate::normalize::normalize;
use crate::sources::{ExerciseDataSource, NewSetPayload, UpdateSetPayload};
use chrono::NaiveDate;
use liftlog_core::limits;
use liftlog_core::models::{ProgressPoint, RirPatch, SetDraft, SetKey, SetPatch, SetRecord, TrainingSummary};
use liftlog_core::{AppError, AppResult};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SessionState {
    user: Option<String>,
    records: Vec<SetRecord>,
    /// Bumped on every login/logout; an in-flight load compares it before
    /// committing its result
    epoch: u64,
}

/// Session-scoped record store over one data source
pub struct SessionStore {
    source: Arc<dyn ExerciseDataSource>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Store with no active user
    #[must_use]
    pub fn new(source: Arc<dyn ExerciseDataSource>) -> Self {
        Self {
            source,
            state: RwLock::new(SessionState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The active username, if any
    #[must_use]
    pub fn active_user(&self) -> Option<String> {
        self.read().user.clone()
    }

    /// Snapshot of the current collection
    #[must_use]
    pub fn records(&self) -> Vec<SetRecord> {
        self.read().records.clone()
    }

    /// Create an account with the backend
    ///
    /// # Errors
    ///
    /// Propagates the source's failure unchanged.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        self.source.register(username, password).await
    }

    /// Check credentials and, on success, make `username` the active user and
    /// load their collection.
    ///
    /// Rejected credentials are `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Fails when the post-login load fails; the store is then fail-closed
    /// (no active user, empty collection).
    pub async fn login(&self, username: &str, password: &str) -> AppResult<bool> {
        if !self.source.login(username, password).await? {
            return Ok(false);
        }
        {
            let mut state = self.write();
            state.user = Some(username.to_owned());
            state.records = Vec::new();
            state.epoch += 1;
        }
        info!("user '{username}' logged in");
        self.load().await?;
        Ok(true)
    }

    /// Clear the active user and collection. Synchronous; no network call.
    pub fn logout(&self) {
        let mut state = self.write();
        if let Some(user) = state.user.take() {
            info!("user '{user}' logged out");
        }
        state.records = Vec::new();
        state.epoch += 1;
    }

    /// Fetch the active user's records and replace the collection wholesale.
    ///
    /// A load whose session epoch went stale while the round trip was in
    /// flight is discarded silently; the newer session already owns the
    /// collection.
    ///
    /// # Errors
    ///
    /// A transport failure clears the active user and the collection
    /// (fail-closed: forced logout instead of stale or partial data) and is
    /// then propagated.
    pub async fn load(&self) -> AppResult<()> {
        let (user, epoch) = {
            let state = self.read();
            let user = state.user.clone().ok_or_else(AppError::auth_required)?;
            (user, state.epoch)
        };

        match self.source.fetch_all(&user).await {
            Ok(raw) => {
                let records = normalize(raw);
                let mut state = self.write();
                if state.epoch == epoch {
                    debug!("loaded {} records for '{user}'", records.len());
                    state.records = records;
                } else {
                    debug!("discarding stale load for '{user}'");
                }
                Ok(())
            }
            Err(err) => {
                let mut state = self.write();
                if state.epoch == epoch {
                    warn!("load for '{user}' failed, forcing logout: {err}");
                    state.user = None;
                    state.records = Vec::new();
                    state.epoch += 1;
                }
                Err(err)
            }
        }
    }

    /// Validate and submit a new set, then resynchronize from the backend.
    ///
    /// There is no optimistic local insert; the collection changes only
    /// through the re-load, so a failed submission leaves it untouched.
    ///
    /// # Errors
    ///
    /// Validation failures are reported before any network call; submission
    /// and re-load failures are propagated.
    pub async fn add_set(&self, draft: SetDraft) -> AppResult<()> {
        validate_draft(&draft)?;
        let user = self.active_user().ok_or_else(AppError::auth_required)?;

        let payload = NewSetPayload::from(draft);
        self.source.save_set(&user, &payload).await?;
        self.load().await
    }

    /// Diff a patch against the currently known record and submit only the
    /// fields that changed, then resynchronize. A patch that changes nothing
    /// is a no-op with no network call.
    ///
    /// # Errors
    ///
    /// Fails with `ResourceNotFound` when no record matches the identity,
    /// with a validation error for out-of-range patch values, and propagates
    /// submission and re-load failures.
    pub async fn update_set(&self, key: SetKey, patch: SetPatch) -> AppResult<()> {
        validate_patch(&patch)?;
        let user = self.active_user().ok_or_else(AppError::auth_required)?;

        let current = self
            .read()
            .records
            .iter()
            .find(|r| r.matches(&key))
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!("no set {} of '{}'", key.set, key.exercise))
            })?;

        let mut payload = UpdateSetPayload::identity(&key);
        if let Some(weight) = patch.weight {
            if (weight - current.weight).abs() > f64::EPSILON {
                payload.weight = Some(weight);
            }
        }
        if let Some(reps) = patch.reps {
            if reps != current.reps {
                payload.reps = Some(reps);
            }
        }
        match patch.rir {
            RirPatch::Untouched => {}
            RirPatch::Clear => {
                if current.rir.is_some() {
                    payload.rir = Some(None);
                }
            }
            RirPatch::Set(value) => {
                if current.rir != Some(value) {
                    payload.rir = Some(Some(value));
                }
            }
        }

        if payload.has_no_changes() {
            debug!("patch for set {} of '{}' changes nothing", key.set, key.exercise);
            return Ok(());
        }

        self.source.update_set(&user, &payload).await?;
        self.load().await
    }

    /// Fetch today's records without touching the collection
    ///
    /// # Errors
    ///
    /// Propagates transport failures; requires an active user.
    pub async fn fetch_today(&self) -> AppResult<Vec<SetRecord>> {
        let user = self.active_user().ok_or_else(AppError::auth_required)?;
        let raw = self.source.fetch_today(&user).await?;
        Ok(normalize(raw))
    }

    // ── Query views over the current collection ─────────────────────────

    /// All records on `date`, collection order
    #[must_use]
    pub fn records_on(&self, date: NaiveDate) -> Vec<SetRecord> {
        analysis::records_on(&self.read().records, date)
    }

    /// Chronological history for one exercise
    #[must_use]
    pub fn history_for(&self, exercise: &str) -> Vec<SetRecord> {
        analysis::history_for(&self.read().records, exercise)
    }

    /// Distinct exercise names, ascending
    #[must_use]
    pub fn exercise_names(&self) -> Vec<String> {
        analysis::exercise_names(&self.read().records)
    }

    /// Distinct training dates, newest first
    #[must_use]
    pub fn dates_desc(&self) -> Vec<NaiveDate> {
        analysis::dates_desc(&self.read().records)
    }

    /// Per-date progress series for one exercise
    #[must_use]
    pub fn progress_for(&self, exercise: &str) -> Vec<ProgressPoint> {
        analysis::progress_for(&self.read().records, exercise)
    }

    /// Next free set ordinal for the exercise on `date`
    #[must_use]
    pub fn next_set_number(&self, exercise: &str, date: NaiveDate) -> u32 {
        analysis::next_set_number(&self.read().records, exercise, date)
    }

    /// Dashboard aggregate over the whole collection
    #[must_use]
    pub fn training_summary(&self) -> TrainingSummary {
        analysis::training_summary(&self.read().records)
    }
}

fn validate_draft(draft: &SetDraft) -> AppResult<()> {
    if draft.exercise.trim().is_empty() {
        return Err(AppError::missing_field("exercise"));
    }
    if draft.exercise.len() > limits::MAX_EXERCISE_NAME_LEN {
        return Err(AppError::invalid_input("exercise name is too long"));
    }
    if !draft.weight.is_finite() || draft.weight <= 0.0 {
        return Err(AppError::value_out_of_range("weight must be positive"));
    }
    if draft.reps < limits::MIN_REPS {
        return Err(AppError::value_out_of_range("reps must be positive"));
    }
    if draft.set < limits::MIN_SET_NUMBER {
        return Err(AppError::value_out_of_range("set number must be positive"));
    }
    Ok(())
}

fn validate_patch(patch: &SetPatch) -> AppResult<()> {
    if let Some(weight) = patch.weight {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::value_out_of_range("weight must be positive"));
        }
    }
    if let Some(reps) = patch.reps {
        if reps < limits::MIN_REPS {
            return Err(AppError::value_out_of_range("reps must be positive"));
        }
    }
    Ok(())
}
