//! Entry and peek items.
//!
//! Every test gets one [`EntryItem`] in the explorer list and one
//! [`PeekItem`] in the peek strip, linked by the same [`TestIndex`]. Items
//! are created once and only their mutable attributes change afterwards;
//! only the coordinator writes those attributes, so the setters here are
//! crate-private.
//!
//! An entry's content exists exactly while the entry is in the viewport.
//! A filtered-out entry keeps its content (it is merely not displayed), and
//! an unrendered entry keeps its fixed height so the scroll geometry does
//! not depend on what is rendered.

use serde::Serialize;
use sv_common::format::{kb_as_mb, middle_ellipsis};
use sv_common::{TestIndex, TestRecord, TestStatus};

/// Attribute names of an entry, as exposed to the serialized views.
pub mod entry_attr {
    pub const INDEX: &str = "te-index";
    pub const STATUS: &str = "te-status";
    pub const VISIBLE: &str = "te-visible";
    pub const SELECTED: &str = "te-user-selected";
    pub const STARRED: &str = "te-user-starred";
    pub const IN_VIEW: &str = "te-in-view";
}

/// Attribute names of a peek item.
pub mod peek_attr {
    pub const INDEX: &str = "data-idx";
    pub const SELECTED: &str = "data-slt";
    pub const ENTRY_VISIBLE: &str = "data-vis";
    pub const ENTRY_IN_VIEW: &str = "data-ivw";
}

/// Status glyph of an entry or of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusGlyph {
    Success,
    Error,
    /// Failed, but some attempts succeeded.
    Flaky,
}

impl StatusGlyph {
    pub fn for_outcome(ok: bool, task_count: usize, task_error_count: usize) -> Self {
        if ok {
            StatusGlyph::Success
        } else if task_error_count < task_count {
            StatusGlyph::Flaky
        } else {
            StatusGlyph::Error
        }
    }

    /// Material icon name.
    pub fn icon(self) -> &'static str {
        match self {
            StatusGlyph::Success => "check_circle_outline",
            StatusGlyph::Error => "error_outline",
            StatusGlyph::Flaky => "flaky",
        }
    }
}

/// Binary pass/fail glyph of a peek item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeekGlyph {
    Pass,
    Fail,
}

impl PeekGlyph {
    pub fn icon(self) -> &'static str {
        match self {
            PeekGlyph::Pass => "done",
            PeekGlyph::Fail => "priority_high",
        }
    }
}

/// Star toggle glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarGlyph {
    Filled,
    Empty,
}

impl StarGlyph {
    pub fn for_starred(starred: bool) -> Self {
        if starred {
            StarGlyph::Filled
        } else {
            StarGlyph::Empty
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            StarGlyph::Filled => "star",
            StarGlyph::Empty => "star_border",
        }
    }
}

/// Hover tooltip: a bold title followed by plain lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
}

/// Materialized content of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryContent {
    pub status: StatusGlyph,
    /// Identifier, middle-truncated to the width budget.
    pub id_text: String,
    pub star: StarGlyph,
    pub tooltip: Tooltip,
}

impl EntryContent {
    /// Build the content of `entry` for a budget of `max_chars` identifier
    /// characters.
    pub fn render(entry: &EntryItem, max_chars: usize, ellipsis_head: usize) -> Self {
        let counts = if entry.ok() {
            format!("OK ({})", entry.task_count)
        } else {
            format!(
                "erred: {} out of {}",
                entry.task_error_count, entry.task_count
            )
        };
        EntryContent {
            status: StatusGlyph::for_outcome(entry.ok(), entry.task_count, entry.task_error_count),
            id_text: middle_ellipsis(&entry.test_id, max_chars, ellipsis_head),
            star: StarGlyph::for_starred(entry.starred),
            tooltip: Tooltip {
                title: entry.test_id.clone(),
                lines: vec![
                    format!(
                        "{:.1} ms, {}",
                        entry.avg_runtime_ms,
                        kb_as_mb(entry.avg_maxrss_kb)
                    ),
                    counts,
                ],
            },
        }
    }
}

/// One test in the explorer list.
#[derive(Debug, Clone, Serialize)]
pub struct EntryItem {
    index: TestIndex,
    test_id: String,
    status: TestStatus,
    avg_runtime_ms: f64,
    avg_maxrss_kb: f64,
    task_count: usize,
    task_error_count: usize,
    height_px: u32,
    visible: bool,
    selected: bool,
    starred: bool,
    in_viewport: bool,
    content: Option<EntryContent>,
}

impl EntryItem {
    pub(crate) fn new(index: TestIndex, test_id: &str, record: &TestRecord, height_px: u32) -> Self {
        Self {
            index,
            test_id: test_id.to_string(),
            status: record.status(),
            avg_runtime_ms: record.runtime_stat.mean,
            avg_maxrss_kb: record.maxrss_stat.mean,
            task_count: record.task_count(),
            task_error_count: record.task_error_count,
            height_px,
            visible: true,
            selected: false,
            starred: false,
            in_viewport: false,
            content: None,
        }
    }

    pub fn index(&self) -> TestIndex {
        self.index
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Mean processor runtime in milliseconds.
    pub fn avg_runtime_ms(&self) -> f64 {
        self.avg_runtime_ms
    }

    /// Mean max resident set size in kilobytes.
    pub fn avg_maxrss_kb(&self) -> f64 {
        self.avg_maxrss_kb
    }

    pub fn task_count(&self) -> usize {
        self.task_count
    }

    pub fn task_error_count(&self) -> usize {
        self.task_error_count
    }

    /// Layout height, identical whether or not the entry is rendered.
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Passed the current filter.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_starred(&self) -> bool {
        self.starred
    }

    pub fn is_in_viewport(&self) -> bool {
        self.in_viewport
    }

    pub fn is_rendered(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&EntryContent> {
        self.content.as_ref()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Flip the star; a rendered entry refreshes its star glyph, an
    /// unrendered one picks the state up when it is next materialized.
    pub(crate) fn toggle_star(&mut self) -> bool {
        self.starred = !self.starred;
        let star = StarGlyph::for_starred(self.starred);
        if let Some(content) = self.content.as_mut() {
            content.star = star;
        }
        self.starred
    }

    /// Set viewport membership, materializing or clearing content to match.
    /// Returns whether the rendered state changed.
    pub(crate) fn set_in_viewport(&mut self, in_viewport: bool, max_chars: usize, head: usize) -> bool {
        self.in_viewport = in_viewport;
        match (in_viewport, self.content.is_some()) {
            (true, false) => {
                self.content = Some(EntryContent::render(self, max_chars, head));
                true
            }
            (false, true) => {
                self.content = None;
                true
            }
            _ => false,
        }
    }

    /// Re-render existing content, e.g. after the container was resized.
    pub(crate) fn rerender(&mut self, max_chars: usize, head: usize) {
        if self.content.is_some() {
            self.content = Some(EntryContent::render(self, max_chars, head));
        }
    }
}

/// Always-rendered view of a peek item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeekView {
    pub glyph: PeekGlyph,
    /// Full test identifier.
    pub tooltip: String,
}

impl PeekView {
    pub fn render(peek: &PeekItem) -> Self {
        PeekView {
            glyph: if peek.status.is_ok() {
                PeekGlyph::Pass
            } else {
                PeekGlyph::Fail
            },
            tooltip: peek.test_id.clone(),
        }
    }
}

/// One test in the peek strip. Mirrors its entry's state.
#[derive(Debug, Clone, Serialize)]
pub struct PeekItem {
    index: TestIndex,
    test_id: String,
    status: TestStatus,
    selected: bool,
    entry_visible: bool,
    entry_in_viewport: bool,
}

impl PeekItem {
    pub(crate) fn new(index: TestIndex, test_id: &str, status: TestStatus) -> Self {
        Self {
            index,
            test_id: test_id.to_string(),
            status,
            selected: false,
            entry_visible: true,
            entry_in_viewport: false,
        }
    }

    pub fn index(&self) -> TestIndex {
        self.index
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_entry_visible(&self) -> bool {
        self.entry_visible
    }

    pub fn is_entry_in_viewport(&self) -> bool {
        self.entry_in_viewport
    }

    /// The peek item's content; it never depends on mutable state.
    pub fn view(&self) -> PeekView {
        PeekView::render(self)
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_entry_visible(&mut self, visible: bool) {
        self.entry_visible = visible;
    }

    pub(crate) fn set_entry_in_viewport(&mut self, in_viewport: bool) {
        self.entry_in_viewport = in_viewport;
    }
}
