//! Test identity and status types.
//!
//! A test is identified by its test ID string in the input data, but the
//! views address it by a small integer index assigned once, in ascending
//! test-ID order, when the views are built. The index is never reused or
//! reordered, so it stays valid across filtering and sorting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a test within one report session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestIndex(pub usize);

impl TestIndex {
    /// Position of this test in index-ordered storage.
    pub fn get(self) -> usize {
        self.0
    }

    /// Parse an index from its attribute encoding (a decimal string).
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<usize>().ok().map(TestIndex)
    }
}

impl fmt::Display for TestIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for TestIndex {
    fn from(index: usize) -> Self {
        TestIndex(index)
    }
}

/// Overall status of a test, fixed when the report is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Every attempt succeeded.
    Success,
    /// At least one attempt failed.
    Error,
}

impl TestStatus {
    /// Status derived from the test's `ok` flag.
    pub fn from_ok(ok: bool) -> Self {
        if ok {
            TestStatus::Success
        } else {
            TestStatus::Error
        }
    }

    /// Whether this is a success.
    pub fn is_ok(self) -> bool {
        matches!(self, TestStatus::Success)
    }

    /// Attribute encoding: `"1"` for success, `"0"` for error.
    pub fn attr_value(self) -> &'static str {
        match self {
            TestStatus::Success => "1",
            TestStatus::Error => "0",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Success => write!(f, "success"),
            TestStatus::Error => write!(f, "error"),
        }
    }
}
