//! Custom error types for dti-query
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for dti-query operations
#[derive(Error, Debug)]
pub enum DtiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The dataset could not be loaded (missing file, bad header, bad cell)
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// Invalid user input (year, format, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl DtiError {
    /// Create a load error for required columns absent from the header row
    pub fn missing_columns(columns: &[&str]) -> Self {
        Self::DataLoad(format!("missing required columns: {}", columns.join(", ")))
    }

    /// Create a load error pointing at a 1-based data row
    pub fn bad_cell(row: usize, column: &str, reason: impl std::fmt::Display) -> Self {
        Self::DataLoad(format!("row {}, column '{}': {}", row, column, reason))
    }

    /// Check if this is a data load error
    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::DataLoad(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DtiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DtiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for DtiError {
    fn from(err: csv::Error) -> Self {
        Self::DataLoad(err.to_string())
    }
}

impl From<calamine::Error> for DtiError {
    fn from(err: calamine::Error) -> Self {
        Self::DataLoad(err.to_string())
    }
}

/// Result type alias for dti-query operations
pub type DtiResult<T> = Result<T, DtiError>;
