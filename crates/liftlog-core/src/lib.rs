// ABOUTME: Core types for the liftlog training log client
// ABOUTME: Foundation crate with set record models, error handling, and shared limits
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Liftlog Core
//!
//! Foundation crate for the liftlog training log client. Holds the canonical
//! data model (one [`models::SetRecord`] per performed set), the unified error
//! system, and the validation limits shared by the store and the CLI. This
//! crate is designed to change infrequently.

/// Unified error handling with `AppError` and `ErrorCode`
pub mod errors;

/// Validation bounds shared by the store and the CLI
pub mod limits;

/// Canonical data models (`SetRecord`, `ProgressPoint`, drafts and patches)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
