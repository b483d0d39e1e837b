// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment-based configuration, fixed local storage keys, and defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Application constants grouped by domain. Configuration is environment-only;
//! there are no config files to parse.

use std::env;
use std::path::PathBuf;

/// Environment-based configuration
pub mod env_config {
    use super::{env, PathBuf};

    /// Default persistence API base URL, fixed at build time
    pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

    /// Default HTTP request timeout in seconds
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    /// Default HTTP connection timeout in seconds
    pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Get the persistence API base URL from environment or default
    #[must_use]
    pub fn api_base_url() -> String {
        env::var("LIFTLOG_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_owned())
    }

    /// Get the HTTP request timeout from environment or default
    #[must_use]
    pub fn http_timeout_secs() -> u64 {
        env::var("LIFTLOG_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// Get the HTTP connection timeout from environment or default
    #[must_use]
    pub fn http_connect_timeout_secs() -> u64 {
        env::var("LIFTLOG_HTTP_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HTTP_CONNECT_TIMEOUT_SECS)
    }

    /// Get the directory for local persistence from environment or the
    /// platform data directory
    #[must_use]
    pub fn data_dir() -> PathBuf {
        env::var("LIFTLOG_DATA_DIR").map_or_else(
            |_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("liftlog")
            },
            PathBuf::from,
        )
    }
}

/// Fixed keys for locally persisted state.
///
/// The local persistence mode stores the active username and the fallback
/// record collection under these names. Opaque blobs, no migration format.
pub mod storage_keys {
    /// File name holding the active username
    pub const ACTIVE_USER: &str = "liftlog-user";

    /// File name holding the fallback record collection
    pub const RECORDS: &str = "liftlog-exercises.json";
}

/// Service identity used in logs
pub mod service_names {
    /// Canonical service name for structured logging
    pub const LIFTLOG: &str = "liftlog";
}
