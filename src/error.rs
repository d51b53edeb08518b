//! Error handling for the report generator
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("api error: {0}")]
    ApiError(String),

    #[error("spreadsheet error: {0}")]
    SpreadsheetError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for report operations
pub type Result<T> = anyhow::Result<T>;
