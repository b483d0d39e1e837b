// ABOUTME: Logging configuration and structured logging setup
// ABOUTME: Configures log levels, formatters, and noise suppression for HTTP internals
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Logging configuration with structured output

use liftlog_core::{AppError, AppResult};
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for machine-consumed logs
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        Self { level, format }
    }

    /// Initialize the global tracing subscriber.
    ///
    /// HTTP client internals are pinned to `warn` unless the directive
    /// overrides them explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracing subscriber fails to initialize, e.g.
    /// when a subscriber is already installed.
    pub fn init(&self) -> AppResult<()> {
        let directives = format!("{},hyper=warn,reqwest=warn,rustls=warn", self.level);
        let env_filter = EnvFilter::try_new(&directives)
            .map_err(|e| AppError::config(format!("invalid log directive: {e}")))?;

        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match self.format {
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
            LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
            LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        };

        result.map_err(|e| AppError::config(format!("failed to install subscriber: {e}")))
    }
}
