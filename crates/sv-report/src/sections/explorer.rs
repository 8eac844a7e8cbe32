//! Explorer list, peek strip and search controls.

use serde::Serialize;
use sv_common::{TestIndex, TestStatus};
use sv_view::item::{entry_attr, peek_attr};
use sv_view::{EntryContent, EntryItem, PeekItem, PeekView, SortKey, ViewState};

/// Attribute list of an element: name and value, `None` for a boolean
/// attribute that is present without a value.
pub type Attributes = Vec<(&'static str, Option<String>)>;

fn push_flag(attrs: &mut Attributes, name: &'static str, set: bool) {
    if set {
        attrs.push((name, None));
    }
}

/// One entry of the explorer list.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub index: TestIndex,
    pub test_id: String,
    pub status: TestStatus,
    pub visible: bool,
    pub selected: bool,
    pub starred: bool,
    pub in_view: bool,
    pub height_px: u32,
    pub content: Option<EntryContent>,
}

impl From<&EntryItem> for EntryRow {
    fn from(entry: &EntryItem) -> Self {
        Self {
            index: entry.index(),
            test_id: entry.test_id().to_string(),
            status: entry.status(),
            visible: entry.is_visible(),
            selected: entry.is_selected(),
            starred: entry.is_starred(),
            in_view: entry.is_in_viewport(),
            height_px: entry.height_px(),
            content: entry.content().cloned(),
        }
    }
}

impl EntryRow {
    pub fn attributes(&self) -> Attributes {
        let mut attrs = vec![
            (entry_attr::INDEX, Some(self.index.to_string())),
            (entry_attr::STATUS, Some(self.status.attr_value().to_string())),
        ];
        push_flag(&mut attrs, entry_attr::VISIBLE, self.visible);
        push_flag(&mut attrs, entry_attr::SELECTED, self.selected);
        push_flag(&mut attrs, entry_attr::STARRED, self.starred);
        push_flag(&mut attrs, entry_attr::IN_VIEW, self.in_view);
        attrs
    }
}

/// One icon of the peek strip.
#[derive(Debug, Clone, Serialize)]
pub struct PeekRow {
    pub index: TestIndex,
    pub selected: bool,
    pub entry_visible: bool,
    pub entry_in_view: bool,
    pub view: PeekView,
}

impl From<&PeekItem> for PeekRow {
    fn from(peek: &PeekItem) -> Self {
        Self {
            index: peek.index(),
            selected: peek.is_selected(),
            entry_visible: peek.is_entry_visible(),
            entry_in_view: peek.is_entry_in_viewport(),
            view: peek.view(),
        }
    }
}

impl PeekRow {
    pub fn attributes(&self) -> Attributes {
        let mut attrs = vec![(peek_attr::INDEX, Some(self.index.to_string()))];
        push_flag(&mut attrs, peek_attr::SELECTED, self.selected);
        push_flag(&mut attrs, peek_attr::ENTRY_VISIBLE, self.entry_visible);
        push_flag(&mut attrs, peek_attr::ENTRY_IN_VIEW, self.entry_in_view);
        attrs
    }
}

/// Snapshot of the explorer side of the view state.
#[derive(Debug, Clone, Serialize)]
pub struct ExplorerSection {
    pub search_text: String,
    pub search_error: Option<String>,
    pub checkboxes_enabled: bool,
    pub show_success: bool,
    pub show_error: bool,
    pub stats_message: String,
    pub sort_key: SortKey,
    /// Intersection margin for the host's viewport observer.
    pub viewport_margin_pct: f64,
    /// Entries in display order.
    pub entries: Vec<EntryRow>,
    /// Peek icons in display order.
    pub peeks: Vec<PeekRow>,
}

impl ExplorerSection {
    pub fn from_state(state: &ViewState) -> Self {
        let criteria = state.criteria();
        Self {
            search_text: state.search_text().to_string(),
            search_error: state.search_error().map(str::to_string),
            checkboxes_enabled: state.checkboxes_enabled(),
            show_success: criteria.show_success,
            show_error: criteria.show_error,
            stats_message: state.last_stats().status_message(),
            sort_key: state.sort_key(),
            viewport_margin_pct: state.viewport_margin_pct(),
            entries: state.entries_in_order().map(EntryRow::from).collect(),
            peeks: state.peeks_in_order().map(PeekRow::from).collect(),
        }
    }

    pub fn rendered_count(&self) -> usize {
        self.entries.iter().filter(|e| e.content.is_some()).count()
    }
}
