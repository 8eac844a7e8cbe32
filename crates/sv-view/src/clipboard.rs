//! Copy-to-clipboard with graceful degradation.
//!
//! The platform clipboard is an injected capability. When it is missing or
//! refuses, the copy action becomes a no-op; the first failure produces an
//! advisory for the user and later failures stay silent.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard is not supported on this platform")]
    Unsupported,

    #[error("clipboard access denied")]
    Denied,

    #[error("clipboard error: {0}")]
    Platform(String),
}

/// Platform clipboard capability.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// What the host should show after a copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// First failure; show this advisory once.
    Advisory(String),
    /// Failure after the advisory was already shown.
    Silent,
}

/// What the copy button copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    TestId,
    Command,
}

/// Copy action with one-time failure advisory.
#[derive(Debug, Default, Clone)]
pub struct CopyAction {
    advised: bool,
}

impl CopyAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_advised(&self) -> bool {
        self.advised
    }

    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, text: &str) -> CopyOutcome {
        match clipboard.write_text(text) {
            Ok(()) => {
                debug!(chars = text.chars().count(), "Copied to clipboard");
                CopyOutcome::Copied
            }
            Err(e) if self.advised => {
                debug!(error = %e, "Clipboard copy failed");
                CopyOutcome::Silent
            }
            Err(e) => {
                warn!(error = %e, "Clipboard copy failed; copy buttons are inactive");
                self.advised = true;
                CopyOutcome::Advisory(format!("Copy is unavailable: {e}"))
            }
        }
    }
}
