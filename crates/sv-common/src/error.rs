//! Error types for Score View.
//!
//! Errors carry stable numeric codes grouped by range:
//! - 10-19: input document errors
//! - 60-69: I/O and serialization errors

use thiserror::Error;

/// Result type alias for Score View operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Semantic problems found in a report input document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("test '{test_id}' refers to task result {position}, but only {available} exist")]
    TaskIndexOutOfRange {
        test_id: String,
        position: usize,
        available: usize,
    },

    #[error("test '{test_id}' has no task results")]
    NoTasks { test_id: String },

    #[error("test '{test_id}' reports {errors} failed tasks out of {tasks}")]
    ErrorCountExceedsTasks {
        test_id: String,
        errors: usize,
        tasks: usize,
    },

    #[error("test '{test_id}' has ok={ok} but {errors} failed tasks")]
    StatusMismatch {
        test_id: String,
        ok: bool,
        errors: usize,
    },

    #[error("testErrorCount is {declared}, but {counted} tests failed")]
    TestErrorCountMismatch { declared: usize, counted: usize },

    #[error("invalid run timing: {0}")]
    InvalidTiming(String),
}

/// Unified error type for Score View.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid report input: {0}")]
    Input(#[from] InputError),

    #[error("unsupported input schema version: expected {expected}, got {actual}")]
    SchemaVersion { expected: String, actual: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> u32 {
        match self {
            Error::Input(_) => 10,
            Error::SchemaVersion { .. } => 11,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns whether regenerating the input could fix the error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Input(_) => false,
            Error::SchemaVersion { .. } => false,
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Input(_) => "Invalid Report Input",
            Error::SchemaVersion { .. } => "Unsupported Input Version",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "Malformed Report Input",
        }
    }
}
