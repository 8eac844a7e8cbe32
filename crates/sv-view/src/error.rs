//! Error types for the view-state layer.
//!
//! A rejected search pattern is not an error here: it is recovered inside
//! the coordinator and surfaced as [`crate::FilterOutcome::Rejected`].
//! The variants below are either programming errors (an index that does
//! not exist, a broken pairing or selection invariant) or failures of the
//! preference store.

use crate::frame::FrameSlot;
use sv_common::TestIndex;
use thiserror::Error;

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors raised by the view-state layer.
#[derive(Error, Debug)]
pub enum ViewError {
    /// No entry carries this index.
    #[error("no test entry with index {index} (collection holds {len})")]
    UnknownIndex { index: TestIndex, len: usize },

    /// The entry exists but its peek item is missing or mismatched.
    #[error("test entry {index} has no paired peek item")]
    Unpaired { index: TestIndex },

    /// A new selection was set without clearing the previous one.
    #[error("entry {current} is still selected; unset it before selecting {requested}")]
    SelectionConflict {
        current: TestIndex,
        requested: TestIndex,
    },

    /// Internal state disagrees with itself.
    #[error("view invariant violated: {0}")]
    InvariantViolation(String),

    /// A detail-panel operation was requested with nothing selected.
    #[error("no entry is selected")]
    NoSelection,

    /// The detail panel has no inline-frame source for this slot.
    #[error("no inline frame source for {slot}")]
    NoFrameSource { slot: FrameSlot },

    /// Invalid view configuration.
    #[error("invalid view configuration: {0}")]
    InvalidConfig(String),

    /// A stored preference holds an unrecognized value.
    #[error("invalid preference {key}={value}")]
    InvalidPreference { key: String, value: String },

    /// Preference store I/O error.
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference store serialization error.
    #[error("preference store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViewError {
    /// Stable error code.
    pub fn code(&self) -> u32 {
        match self {
            ViewError::UnknownIndex { .. } => 20,
            ViewError::Unpaired { .. } => 21,
            ViewError::SelectionConflict { .. } => 22,
            ViewError::InvariantViolation(_) => 23,
            ViewError::NoSelection => 24,
            ViewError::NoFrameSource { .. } => 25,
            ViewError::InvalidConfig(_) => 30,
            ViewError::InvalidPreference { .. } => 31,
            ViewError::Io(_) => 60,
            ViewError::Json(_) => 61,
        }
    }

    /// Whether the error indicates a bug in the coordinator or its caller.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            ViewError::UnknownIndex { .. }
                | ViewError::Unpaired { .. }
                | ViewError::SelectionConflict { .. }
                | ViewError::InvariantViolation(_)
        )
    }
}
