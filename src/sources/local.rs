// ABOUTME: File-backed implementation of the exercise data source
// ABOUTME: Stores the active username and record collection under fixed keys in the data dir
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{ExerciseDataSource, NewSetPayload, UpdateSetPayload};
use crate::constants::{env_config, storage_keys};
use async_trait::async_trait;
use chrono::Local;
use liftlog_core::models::SetRecord;
use liftlog_core::{AppError, AppResult};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Data source persisting to local JSON files.
///
/// The fallback for running without a backend: the active username and the
/// record collection live under fixed keys in the data directory. Single-user
/// by construction; credentials always pass. No migration format.
pub struct LocalSource {
    dir: PathBuf,
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSource {
    /// Source under the configured data directory
    #[must_use]
    pub fn new() -> Self {
        Self::with_dir(env_config::data_dir())
    }

    /// Source under an explicit directory
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(storage_keys::ACTIVE_USER)
    }

    fn records_path(&self) -> PathBuf {
        self.dir.join(storage_keys::RECORDS)
    }

    async fn read_records(&self) -> AppResult<Vec<SetRecord>> {
        match fs::read(self.records_path()).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::serialization("corrupt record collection").with_source(e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::storage("failed to read record collection").with_source(e)),
        }
    }

    /// Write-temp-then-rename so a crash never leaves a half-written file
    async fn write_records(&self, records: &[SetRecord]) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::serialization("failed to encode records").with_source(e))?;
        write_atomically(&self.dir, &self.records_path(), &bytes).await
    }
}

async fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> AppResult<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::storage("failed to create data directory").with_source(e))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)
        .await
        .map_err(|e| AppError::storage("failed to write local state").with_source(e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| AppError::storage("failed to commit local state").with_source(e))
}

#[async_trait]
impl ExerciseDataSource for LocalSource {
    async fn register(&self, username: &str, _password: &str) -> AppResult<()> {
        write_atomically(&self.dir, &self.user_path(), username.as_bytes()).await
    }

    async fn login(&self, username: &str, _password: &str) -> AppResult<bool> {
        write_atomically(&self.dir, &self.user_path(), username.as_bytes()).await?;
        Ok(true)
    }

    async fn save_set(&self, username: &str, set: &NewSetPayload) -> AppResult<()> {
        let mut records = self.read_records().await?;
        let record = SetRecord {
            id: Uuid::new_v4().to_string(),
            date: Some(set.date.unwrap_or_else(|| Local::now().date_naive())),
            week: None,
            exercise: set.exercise.clone(),
            set: set.set,
            weight: set.weight,
            reps: set.reps,
            rir: set.rir,
        };
        debug!("appending set {} of '{}' for '{username}'", set.set, set.exercise);
        records.push(record);
        self.write_records(&records).await
    }

    async fn update_set(&self, _username: &str, update: &UpdateSetPayload) -> AppResult<()> {
        let mut records = self.read_records().await?;
        let mut touched = 0_usize;
        for record in records
            .iter_mut()
            .filter(|r| r.exercise == update.exercise && r.set == update.set && r.date == update.date)
        {
            if let Some(weight) = update.weight {
                record.weight = weight;
            }
            if let Some(reps) = update.reps {
                record.reps = reps;
            }
            if let Some(rir) = update.rir {
                record.rir = rir;
            }
            touched += 1;
        }
        if touched == 0 {
            return Err(AppError::not_found(format!(
                "no stored set {} of '{}'",
                update.set, update.exercise
            )));
        }
        self.write_records(&records).await
    }

    async fn fetch_all(&self, _username: &str) -> AppResult<Value> {
        let records = self.read_records().await?;
        serde_json::to_value(records)
            .map_err(|e| AppError::serialization("failed to encode records").with_source(e))
    }

    async fn fetch_today(&self, _username: &str) -> AppResult<Value> {
        let today = Local::now().date_naive();
        let records: Vec<SetRecord> = self
            .read_records()
            .await?
            .into_iter()
            .filter(|r| r.date == Some(today))
            .collect();
        serde_json::to_value(records)
            .map_err(|e| AppError::serialization("failed to encode records").with_source(e))
    }
}
