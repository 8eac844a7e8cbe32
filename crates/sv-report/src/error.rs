//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input document could not be loaded or is inconsistent.
    #[error("invalid report input: {0}")]
    InputError(#[from] sv_common::Error),

    /// View state rejected an operation.
    #[error("view error: {0}")]
    ViewError(#[from] sv_view::ViewError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// View state was built from a different input.
    #[error("view state does not match the report input: {0}")]
    StateMismatch(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    /// Stable error code.
    pub fn code(&self) -> u32 {
        match self {
            ReportError::InputError(e) => e.code(),
            ReportError::ViewError(e) => e.code(),
            ReportError::StateMismatch(_) => 40,
            ReportError::InvalidConfig(_) => 41,
            ReportError::IoError(_) => 60,
            ReportError::JsonError(_) => 61,
        }
    }

    /// Whether retrying with corrected input could succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ReportError::InputError(e) => e.is_recoverable(),
            ReportError::ViewError(e) => !e.is_programming_error(),
            ReportError::IoError(_) | ReportError::InvalidConfig(_) => true,
            ReportError::StateMismatch(_) | ReportError::JsonError(_) => false,
        }
    }
}
