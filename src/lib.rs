// ABOUTME: Main library entry point for the liftlog training log client
// ABOUTME: Session store, payload normalization, data sources, and progress analysis
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Liftlog
//!
//! Client core for a single-user strength-training log: log sets (exercise,
//! weight, reps, RIR) per day, browse history, and derive progress series.
//! Records persist either through a thin REST backend or to local files.
//!
//! ## Architecture
//!
//! - **Sources**: the persistence collaborator behind one trait seam, with
//!   REST and local-file implementations
//! - **Normalize**: classification of the backend's heterogeneous payload
//!   shapes into one canonical record type
//! - **Store**: the session-scoped collection; every mutation round-trips
//!   through the source and resynchronizes, so the server stays the sole
//!   source of truth
//! - **Analysis**: pure derived views - per-date lookup, per-exercise
//!   history, progress series, dashboard aggregates
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use liftlog::sources::RestSource;
//! use liftlog::store::SessionStore;
//! use liftlog_core::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = SessionStore::new(Arc::new(RestSource::new()));
//!     if store.login("ada", "hunter2").await? {
//!         for point in store.progress_for("Barbell Squat") {
//!             println!("{}: {}kg max", point.date_formatted, point.max_weight);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

/// Pure query views over the record collection
pub mod analysis;

/// Application constants and environment-based configuration
pub mod constants;

/// Logging configuration and structured logging setup
pub mod logging;

/// Normalization of backend payload shapes into canonical records
pub mod normalize;

/// Data source implementations (REST backend, local files)
pub mod sources;

/// Session-scoped record store
pub mod store;

pub use liftlog_core::{errors, limits, models};
