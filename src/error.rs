//! Error types for the nutrition engine
//!
//! The computation stages never fail on partial data; they coerce to defaults.
//! These errors only cover caller-side input problems.

use thiserror::Error;

/// Errors that can occur when decoding engine inputs
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}
