// ABOUTME: Shared HTTP client with connection pooling for backend API calls
// ABOUTME: Singleton with configurable timeouts initialized at process startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::env_config;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration.
///
/// Must be called once at startup before the first request is issued. If not
/// called, the environment-derived defaults are used.
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

/// Get the shared HTTP client for backend API calls.
///
/// The client uses connection pooling and configured timeouts. Falls back to
/// environment-derived timeouts if `initialize_shared_client()` was not
/// called.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS.get().copied().unwrap_or_else(|| {
            (
                env_config::http_timeout_secs(),
                env_config::http_connect_timeout_secs(),
            )
        });

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
