// ABOUTME: Shared test utilities for liftlog integration tests
// ABOUTME: Quiet logging setup, record builders, and a scriptable mock data source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Shared test utilities for `liftlog`
//!
//! Common setup to reduce duplication across integration tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use liftlog::sources::{ExerciseDataSource, NewSetPayload, UpdateSetPayload};
use liftlog_core::models::SetRecord;
use liftlog_core::{AppError, AppResult};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Notify;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Parse a `YYYY-MM-DD` literal
pub fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("valid test date")
}

/// Canonical record with the fields the views care about
pub fn record(date_raw: &str, exercise: &str, set: u32, weight: f64, reps: u32) -> SetRecord {
    SetRecord {
        id: format!("{exercise}-{date_raw}-{set}"),
        date: Some(date(date_raw)),
        week: None,
        exercise: exercise.to_owned(),
        set,
        weight,
        reps,
        rir: None,
    }
}

/// Record without a recoverable date
pub fn undated_record(exercise: &str, set: u32, weight: f64, reps: u32) -> SetRecord {
    SetRecord {
        date: None,
        ..record("2000-01-01", exercise, set, weight, reps)
    }
}

/// Hold-and-release handle for one gated `fetch_all` call
pub struct FetchGate {
    /// Notified when the gated fetch has started
    pub started: Arc<Notify>,
    /// Notify to let the gated fetch complete
    pub release: Arc<Notify>,
}

impl FetchGate {
    pub fn new() -> Self {
        Self {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

impl Default for FetchGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Scriptable in-memory data source.
///
/// Responses and failure switches are set by the test; every mutation call is
/// recorded as its serialized wire payload.
pub struct MockSource {
    /// Response to `fetch_all`
    pub payload: Mutex<Value>,
    /// Response to `fetch_today`
    pub today_payload: Mutex<Value>,
    /// Outcome of `login`
    pub login_ok: AtomicBool,
    /// Make `fetch_all` fail
    pub fail_fetch: AtomicBool,
    /// Make `save_set` fail
    pub fail_save: AtomicBool,
    /// Make `update_set` fail
    pub fail_update: AtomicBool,
    /// Serialized bodies of every `save_set` call
    pub saves: Mutex<Vec<Value>>,
    /// Serialized bodies of every `update_set` call
    pub updates: Mutex<Vec<Value>>,
    /// Number of completed `fetch_all` calls
    pub fetches: AtomicUsize,
    /// One-shot gate consumed by the next `fetch_all`
    pub fetch_gate: Mutex<Option<FetchGate>>,
}

impl MockSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            payload: Mutex::new(Value::Array(Vec::new())),
            today_payload: Mutex::new(Value::Array(Vec::new())),
            login_ok: AtomicBool::new(true),
            fail_fetch: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            saves: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            fetch_gate: Mutex::new(None),
        })
    }

    /// Serve these canonical records from `fetch_all`
    pub fn serve_records(&self, records: &[SetRecord]) {
        *self.payload.lock().unwrap() = serde_json::to_value(records).unwrap();
    }

    /// Serve this raw payload from `fetch_all`
    pub fn serve_payload(&self, payload: Value) {
        *self.payload.lock().unwrap() = payload;
    }

    /// Arm a one-shot gate on the next `fetch_all` and return the handles
    pub fn arm_fetch_gate(&self) -> (Arc<Notify>, Arc<Notify>) {
        let gate = FetchGate::new();
        let handles = (Arc::clone(&gate.started), Arc::clone(&gate.release));
        *self.fetch_gate.lock().unwrap() = Some(gate);
        handles
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn last_update(&self) -> Value {
        self.updates.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ExerciseDataSource for MockSource {
    async fn register(&self, _username: &str, _password: &str) -> AppResult<()> {
        Ok(())
    }

    async fn login(&self, _username: &str, _password: &str) -> AppResult<bool> {
        Ok(self.login_ok.load(Ordering::SeqCst))
    }

    async fn save_set(&self, _username: &str, set: &NewSetPayload) -> AppResult<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::external_service("save rejected"));
        }
        self.saves
            .lock()
            .unwrap()
            .push(serde_json::to_value(set).unwrap());
        Ok(())
    }

    async fn update_set(&self, _username: &str, update: &UpdateSetPayload) -> AppResult<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(AppError::external_service("update rejected"));
        }
        self.updates
            .lock()
            .unwrap()
            .push(serde_json::to_value(update).unwrap());
        Ok(())
    }

    async fn fetch_all(&self, _username: &str) -> AppResult<Value> {
        let gate = self.fetch_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AppError::external_service("fetch failed"));
        }
        Ok(self.payload.lock().unwrap().clone())
    }

    async fn fetch_today(&self, _username: &str) -> AppResult<Value> {
        Ok(self.today_payload.lock().unwrap().clone())
    }
}
