//! Core error types for marquee-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! rejections are surfaced synchronously, before any state mutation, and
//! always carry a human-readable reason. Store failures are propagated to
//! the caller untouched -- the core never retries and never rolls back
//! dates that were already written.

use std::path::PathBuf;
use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for marquee-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation rejections (bad ranges, empty selections, stage misuse)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Errors raised by the underlying record store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

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

/// Validation errors.
///
/// These are rejected operations, not faults: nothing has been mutated
/// when one of these is returned.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date range generator guard: refuses runaway selections
    #[error("Date range spans {days} days, which exceeds the {max}-day limit")]
    RangeTooLong { days: i64, max: i64 },

    /// End date precedes start date
    #[error("Invalid date range: end ({end}) is before start ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Stage transition attempted with nothing selected
    #[error("No dates selected")]
    EmptySelection,

    /// Operation called in the wrong planner stage
    #[error("Cannot {operation} while in the {stage} stage")]
    WrongStage { operation: String, stage: String },

    /// Show lookup against the catalog failed
    #[error("Unknown show: {0}")]
    UnknownShow(String),

    /// Profile lookup against the selected show failed
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// Show-kind template confirmed without a show/profile reference
    #[error("Show events require a show and profile to be configured")]
    MissingShowConfig,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by store implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record lookup by key failed
    #[error("No {kind} found for '{key}'")]
    NotFound { kind: String, key: String },

    /// Interior lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Lock,

    /// Backing file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file could not be parsed or encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Data directory could not be resolved or created
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
