//! Core error types for chestboard-core.
//!
//! This module defines the error hierarchy using thiserror so that every
//! fallible operation in the library reports what failed and why.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for chestboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cycle calculation errors
    #[error("Cycle error: {0}")]
    Cycle(#[from] CycleError),

    /// Roster data source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
///
/// A missing or malformed cycle anchor is a programmer/deployment error and
/// surfaces here at load time, before any cycle math runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No config directory could be resolved for this platform
    #[error("Could not resolve a configuration directory")]
    NoConfigDir,
}

/// Cycle calculation errors.
///
/// Callers treat any of these as "cycle unavailable": show a placeholder,
/// skip the countdown, never crash the rest of the view.
#[derive(Error, Debug)]
pub enum CycleError {
    /// The anchor local time does not map to a single instant
    #[error("Anchor time {local} is unrepresentable in timezone {tz}")]
    UnrepresentableAnchor { local: String, tz: String },

    /// Arithmetic overflow while shifting calendar dates
    #[error("Calendar arithmetic out of range at {at}")]
    OutOfRange { at: String },
}

/// Roster data source errors.
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed base URL or endpoint path
    #[error("Invalid source URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a non-success status
    #[error("Source returned status {status} for {endpoint}")]
    BadStatus { status: u16, endpoint: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
