//! Score View common types, identities, and errors.
//!
//! This crate provides the foundation shared by the view-state and report
//! crates:
//! - The read-only report input contract (tests, task results, run timing)
//! - Stable test identity (`TestIndex`) and status encoding
//! - Common error types
//! - Small text and time formatting helpers used by every view

pub mod error;
pub mod format;
pub mod id;
pub mod input;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, InputError, Result};
pub use id::{TestIndex, TestStatus};
pub use input::{
    ExpectedExit, ReportInput, Stat, TaskExit, TaskRecord, TaskStdout, TaskTimes, TestRecord,
};

/// Schema version of the report input document.
pub const INPUT_SCHEMA_VERSION: &str = "1.0.0";
