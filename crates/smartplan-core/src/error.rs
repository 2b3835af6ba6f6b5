//! Core error types for smartplan-core.
//!
//! The scheduling engine itself never fails -- unplaceable tasks are
//! omissions, not errors. These types cover the boundary concerns:
//! persistence, configuration, calendar sync, and input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smartplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Calendar sync errors
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

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

/// Task store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the store file
    #[error("Failed to read task store at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the store file
    #[error("Failed to write task store at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file holds malformed JSON
    #[error("Malformed task store at {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// Task lookup failed
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

/// Configuration errors.
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
}

/// Calendar sync errors.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Not authenticated with the calendar provider
    #[error("Not authenticated with {service}")]
    NotAuthenticated { service: String },

    /// OAuth client credentials not configured
    #[error("OAuth credentials not configured for {service}")]
    CredentialsNotConfigured { service: String },

    /// Authorization flow failed
    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    /// Token exchange failed
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// Token refresh failed
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// Provider API returned an error
    #[error("Calendar API error: {0}")]
    Api(String),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local IO failure (token files, callback listener)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed token or response payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Task is not in a syncable state
    #[error("Task '{0}' has no scheduled time to sync")]
    NotScheduled(String),
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

    /// Invalid clock time string
    #[error("Invalid clock time '{value}': expected HH:MM")]
    InvalidClockTime { value: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
