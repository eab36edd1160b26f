//! Core error types for walkgrove-core.
//!
//! This module defines the error hierarchy using thiserror. Guard failures
//! (locked tree, occupied slot, plant-while-not-ready) are deliberately NOT
//! errors -- those surface as `bool`/`Option` returns on the state machines.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for walkgrove-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Activity-source errors
    #[error("Activity error: {0}")]
    Activity(#[from] ActivityError),

    /// Redemption-provider errors
    #[error("Redemption error: {0}")]
    Redemption(#[from] RedemptionError),

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

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Activity-source errors.
///
/// Raised by the health/pedometer seams; the core state machines are never
/// put in an invalid state by these -- the update cycle is simply skipped.
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The source cannot provide data on this device/build
    #[error("Activity data is not available from {src}")]
    Unavailable { src: String },

    /// The user has not granted access to activity data
    #[error("Permission denied for activity data")]
    PermissionDenied,

    /// The underlying query failed
    #[error("Activity query failed: {0}")]
    QueryFailed(String),
}

/// Redemption-provider errors.
#[derive(Error, Debug)]
pub enum RedemptionError {
    /// No provider configured
    #[error("Tree planting provider is not configured")]
    NotConfigured,

    /// Order lookup failed
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Provider returned something unusable
    #[error("Invalid response from tree planting provider")]
    InvalidResponse,

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid date range
    #[error("Invalid date range: end ({end}) must not precede start ({start})")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Out of bounds
    #[error("Index ({row}, {col}) out of bounds for {collection}")]
    OutOfBounds {
        collection: String,
        row: usize,
        col: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Store(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
