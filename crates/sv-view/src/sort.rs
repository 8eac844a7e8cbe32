//! Ordering of the explorer list and peek strip.

use crate::item::EntryItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort criterion offered by the sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending test ID only.
    #[default]
    TestId,
    /// Mean processor runtime, longest first.
    ProcessorTime,
    /// Mean max resident set size, largest first.
    MemoryFootprint,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [
        SortKey::TestId,
        SortKey::ProcessorTime,
        SortKey::MemoryFootprint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::TestId => "test id",
            SortKey::ProcessorTime => "processor time",
            SortKey::MemoryFootprint => "memory footprint",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Compare two entries; ties on the primary key fall back to ascending
    /// test ID.
    pub fn compare(self, a: &EntryItem, b: &EntryItem) -> Ordering {
        let primary = match self {
            SortKey::TestId => Ordering::Equal,
            SortKey::ProcessorTime => b.avg_runtime_ms().total_cmp(&a.avg_runtime_ms()),
            SortKey::MemoryFootprint => b.avg_maxrss_kb().total_cmp(&a.avg_maxrss_kb()),
        };
        primary.then_with(|| a.test_id().cmp(b.test_id()))
    }
}
