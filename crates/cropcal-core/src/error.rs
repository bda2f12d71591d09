//! Core error types for cropcal-core.
//!
//! This module defines the error hierarchy using thiserror. Domain errors
//! (season checks, event generation) are kept separate from database and
//! configuration errors so callers can match on what actually went wrong.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::season::SeasonWindow;

/// Core error type for cropcal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Calendar domain errors
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Domain errors for season validation and event generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// No crop rule registered under the given name
    #[error("Crop not found: {name}")]
    CropNotFound { name: String },

    /// The candidate sowing date falls outside the crop's annual window
    #[error("{crop} can only be sown between {start} and {end}", start = .window.start, end = .window.end)]
    OutOfSeason { crop: String, window: SeasonWindow },

    /// A day offset pushed the event date outside the representable calendar
    #[error("Date out of range: {date} with offset {offset}")]
    DateOutOfRange { date: NaiveDate, offset: i64 },

    /// A value that does not name a real day of the year
    #[error("Invalid month-day value: {0}")]
    InvalidMonthDay(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
