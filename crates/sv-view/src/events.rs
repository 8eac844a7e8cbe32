//! Input events accepted by the coordinator and the effects it reports.

use crate::filter::FilterStats;
use crate::sort::SortKey;
use sv_common::TestIndex;
use std::time::Instant;

/// Part of an entry that was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Body,
    Star,
}

/// One entry whose viewport membership changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionChange {
    pub index: TestIndex,
    pub is_intersecting: bool,
}

impl IntersectionChange {
    pub fn entered(index: TestIndex) -> Self {
        Self {
            index,
            is_intersecting: true,
        }
    }

    pub fn left(index: TestIndex) -> Self {
        Self {
            index,
            is_intersecting: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The search text changed; applied after the debounce window.
    QueryEdited { text: String, at: Instant },
    /// A status checkbox changed; applied at once.
    CheckboxToggled { show_success: bool, show_error: bool },
    EntryClicked { index: TestIndex, target: ClickTarget },
    PeekClicked { index: TestIndex },
    Intersection(Vec<IntersectionChange>),
    SortRequested(SortKey),
    /// Clock tick driving the debounce timer.
    Tick { at: Instant },
}

/// Scrollable container of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Explorer,
    Peek,
}

/// What the host must do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FilterApplied(FilterStats),
    FilterRejected { error: String },
    DetailOpened(TestIndex),
    DetailClosed,
    ScrollIntoView { container: Container, index: TestIndex },
    EntryMaterialized(TestIndex),
    EntryDematerialized(TestIndex),
    StarToggled { index: TestIndex, starred: bool },
    Reordered(SortKey),
}
