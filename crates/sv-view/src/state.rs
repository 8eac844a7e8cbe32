//! The view-state coordinator.
//!
//! [`ViewState`] owns every entry and peek item and is the only writer of
//! their cross-cutting attributes: visibility (from the filter), selection,
//! star, and viewport membership. Entries and peek items live in two
//! sibling arrays addressed by [`TestIndex`]; the display order of each
//! container is a separate permutation so sorting moves items without
//! recreating them.

use crate::clipboard::{Clipboard, CopyAction, CopyOutcome, CopyTarget};
use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::detail::DetailPanel;
use crate::error::{Result, ViewError};
use crate::events::{ClickTarget, Container, Effect, IntersectionChange, UiEvent};
use crate::filter::{CompiledFilter, FilterCriteria, FilterOutcome, FilterStats};
use crate::frame::{FrameSlot, FrameTransition};
use crate::item::{EntryItem, PeekItem};
use crate::sort::SortKey;
use std::sync::Arc;
use std::time::Instant;
use sv_common::{ReportInput, TestIndex};
use tracing::{debug, warn};

/// Coordinator of the explorer list, the peek strip and the detail panel.
#[derive(Debug)]
pub struct ViewState {
    input: Arc<ReportInput>,
    config: ViewConfig,
    entries: Vec<EntryItem>,
    peeks: Vec<PeekItem>,
    entry_order: Vec<TestIndex>,
    peek_order: Vec<TestIndex>,
    sort_key: SortKey,
    filter: CompiledFilter,
    search_text: String,
    search_error: Option<String>,
    last_stats: FilterStats,
    selected: Option<TestIndex>,
    detail: Option<DetailPanel>,
    query_debounce: Debouncer<String>,
    copy_action: CopyAction,
}

impl ViewState {
    /// Build one entry and one peek item per test, in ascending test-ID
    /// order, and apply the show-everything filter.
    pub fn new(input: Arc<ReportInput>, config: ViewConfig) -> Result<Self> {
        config.validate()?;

        let mut entries = Vec::with_capacity(input.test_count());
        let mut peeks = Vec::with_capacity(input.test_count());
        for (i, (test_id, record)) in input.test_data.iter().enumerate() {
            let index = TestIndex(i);
            entries.push(EntryItem::new(index, test_id, record, config.entry_height_px));
            peeks.push(PeekItem::new(index, test_id, record.status()));
        }
        let order: Vec<TestIndex> = (0..entries.len()).map(TestIndex).collect();

        let filter = CompiledFilter::compile(FilterCriteria::default())
            .map_err(|e| ViewError::InvariantViolation(format!("default filter: {e}")))?;
        let query_debounce = Debouncer::new(config.debounce_window());

        let mut state = Self {
            input,
            config,
            entries,
            peeks,
            entry_order: order.clone(),
            peek_order: order,
            sort_key: SortKey::default(),
            filter,
            search_text: String::new(),
            search_error: None,
            last_stats: FilterStats::default(),
            selected: None,
            detail: None,
            query_debounce,
            copy_action: CopyAction::new(),
        };
        state.set_filter("", true, true);
        debug!(tests = state.len(), "Built view state");
        Ok(state)
    }

    // ---------------------------------------------------------------
    // Filter
    // ---------------------------------------------------------------

    /// Compile `query` and re-evaluate visibility of every pair.
    ///
    /// An invalid pattern flags the search input, disables the status
    /// checkboxes and leaves the previous filter in effect.
    pub fn set_filter(&mut self, query: &str, show_success: bool, show_error: bool) -> FilterOutcome {
        self.search_text = query.to_string();
        let criteria = FilterCriteria::new(query, show_success, show_error);
        let filter = match CompiledFilter::compile(criteria) {
            Ok(filter) => filter,
            Err(e) => {
                let error = e.to_string();
                warn!(query, error = %error, "Rejected search pattern");
                self.search_error = Some(error.clone());
                return FilterOutcome::Rejected { error };
            }
        };

        let started = Instant::now();
        let mut stats = FilterStats::default();
        for (entry, peek) in self.entries.iter_mut().zip(self.peeks.iter_mut()) {
            let visible = filter.matches(entry.test_id(), entry.ok());
            entry.set_visible(visible);
            peek.set_entry_visible(visible);
            if visible {
                if entry.ok() {
                    stats.successes += 1;
                } else {
                    stats.errors += 1;
                }
            }
        }
        stats.elapsed = started.elapsed();

        self.filter = filter;
        self.search_error = None;
        self.last_stats = stats;
        debug!(
            query,
            show_success,
            show_error,
            successes = stats.successes,
            errors = stats.errors,
            "Applied filter"
        );
        FilterOutcome::Applied(stats)
    }

    /// Record an edit of the search text; it is applied once the text has
    /// been quiet for the debounce window.
    pub fn edit_query(&mut self, text: &str, at: Instant) {
        self.search_text = text.to_string();
        self.query_debounce.push(text.to_string(), at);
    }

    /// Apply a debounced query whose window has elapsed by `now`.
    pub fn tick(&mut self, now: Instant) -> Option<FilterOutcome> {
        let query = self.query_debounce.poll(now)?;
        let criteria = self.filter.criteria().clone();
        Some(self.set_filter(&query, criteria.show_success, criteria.show_error))
    }

    /// Apply new checkbox states with the current search text. Ignored
    /// while the checkboxes are disabled.
    pub fn set_status_filter(&mut self, show_success: bool, show_error: bool) -> Option<FilterOutcome> {
        if !self.checkboxes_enabled() {
            debug!("Ignored checkbox change while search input is in error");
            return None;
        }
        let query = self.search_text.clone();
        Some(self.set_filter(&query, show_success, show_error))
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    /// Select from the explorer list, with toggle semantics. Hidden
    /// entries may be selected.
    pub fn select(&mut self, index: TestIndex) -> Result<Vec<Effect>> {
        let mut effects = self.toggle_selection(index)?;
        if self.selected == Some(index) {
            effects.push(Effect::ScrollIntoView {
                container: Container::Peek,
                index,
            });
        }
        Ok(effects)
    }

    /// Select from the peek strip. Ignored when the entry is filtered out.
    pub fn select_from_peek(&mut self, index: TestIndex) -> Result<Vec<Effect>> {
        if !self.peek(index)?.is_entry_visible() {
            debug!(%index, "Ignored peek click on filtered-out test");
            return Ok(Vec::new());
        }
        let mut effects = self.toggle_selection(index)?;
        if self.selected == Some(index) {
            effects.push(Effect::ScrollIntoView {
                container: Container::Explorer,
                index,
            });
        }
        Ok(effects)
    }

    fn toggle_selection(&mut self, index: TestIndex) -> Result<Vec<Effect>> {
        self.pair(index)?;
        let mut effects = Vec::new();
        if let Some(previous) = self.unset_selected()? {
            effects.push(Effect::DetailClosed);
            if previous == index {
                return Ok(effects);
            }
        }
        self.set_selected(index)?;
        effects.push(Effect::DetailOpened(index));
        Ok(effects)
    }

    fn unset_selected(&mut self) -> Result<Option<TestIndex>> {
        let Some(index) = self.selected.take() else {
            return Ok(None);
        };
        let (entry, peek) = self.pair_mut(index)?;
        entry.set_selected(false);
        peek.set_selected(false);
        if let Some(mut panel) = self.detail.take() {
            panel.close_frame();
        }
        debug!(%index, "Cleared selection");
        Ok(Some(index))
    }

    fn set_selected(&mut self, index: TestIndex) -> Result<()> {
        if let Some(current) = self.selected {
            return Err(ViewError::SelectionConflict {
                current,
                requested: index,
            });
        }
        let test_id = self.entry(index)?.test_id().to_string();
        let panel = DetailPanel::build(&self.input, index, &test_id, &self.config)?;
        let (entry, peek) = self.pair_mut(index)?;
        entry.set_selected(true);
        peek.set_selected(true);
        self.selected = Some(index);
        self.detail = Some(panel);
        debug!(%index, test_id = %test_id, "Selected test");
        Ok(())
    }

    /// Flip the star of an entry. Never changes the selection.
    pub fn toggle_star(&mut self, index: TestIndex) -> Result<bool> {
        let (entry, _) = self.pair_mut(index)?;
        let starred = entry.toggle_star();
        debug!(%index, starred, "Toggled star");
        Ok(starred)
    }

    // ---------------------------------------------------------------
    // Viewport
    // ---------------------------------------------------------------

    /// Apply a batch of viewport changes, materializing entries that
    /// entered and clearing those that left. Filter state plays no part.
    pub fn on_viewport_intersection(&mut self, changes: &[IntersectionChange]) -> Result<Vec<Effect>> {
        for change in changes {
            self.pair(change.index)?;
        }
        let budget = self.char_budget();
        let head = self.config.ellipsis_head;
        let mut effects = Vec::new();
        for change in changes {
            let (entry, peek) = self.pair_mut(change.index)?;
            peek.set_entry_in_viewport(change.is_intersecting);
            if entry.set_in_viewport(change.is_intersecting, budget, head) {
                effects.push(if change.is_intersecting {
                    Effect::EntryMaterialized(change.index)
                } else {
                    Effect::EntryDematerialized(change.index)
                });
            }
        }
        debug!(
            changes = changes.len(),
            rendered = self.rendered_count(),
            "Applied viewport changes"
        );
        Ok(effects)
    }

    /// Resize the explorer list; rendered identifiers are re-truncated.
    pub fn set_container_width(&mut self, width_px: f64) -> Result<()> {
        if !(width_px > 0.0) {
            return Err(ViewError::InvalidConfig(format!(
                "container width must be positive, got {width_px}"
            )));
        }
        self.config.container_width_px = width_px;
        let budget = self.char_budget();
        let head = self.config.ellipsis_head;
        for entry in &mut self.entries {
            entry.rerender(budget, head);
        }
        Ok(())
    }

    /// Margin, in percent of the explorer height, by which the host grows
    /// its viewport before reporting intersections.
    pub fn viewport_margin_pct(&self) -> f64 {
        self.config.viewport_margin_pct
    }

    /// Characters of identifier that fit in the explorer list.
    pub fn char_budget(&self) -> usize {
        self.config.char_budget(self.config.container_width_px)
    }

    // ---------------------------------------------------------------
    // Sorting
    // ---------------------------------------------------------------

    /// Reorder both containers with the same comparator.
    pub fn sort_by(&mut self, key: SortKey) {
        let entries = &self.entries;
        let cmp = |a: &TestIndex, b: &TestIndex| key.compare(&entries[a.get()], &entries[b.get()]);
        self.entry_order.sort_by(cmp);
        self.peek_order.sort_by(cmp);
        self.sort_key = key;
        debug!(key = key.label(), "Sorted tests");
    }

    // ---------------------------------------------------------------
    // Detail panel
    // ---------------------------------------------------------------

    pub fn toggle_frame(&mut self, slot: FrameSlot) -> Result<FrameTransition> {
        self.detail
            .as_mut()
            .ok_or(ViewError::NoSelection)?
            .toggle_frame(slot)
    }

    pub fn toggle_command_expansion(&mut self) -> Result<bool> {
        Ok(self
            .detail
            .as_mut()
            .ok_or(ViewError::NoSelection)?
            .toggle_command_expansion())
    }

    /// Copy the selected test's ID or command.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, target: CopyTarget) -> Result<CopyOutcome> {
        let panel = self.detail.as_ref().ok_or(ViewError::NoSelection)?;
        let text = match target {
            CopyTarget::TestId => panel.test_id(),
            CopyTarget::Command => panel.command(),
        };
        Ok(self.copy_action.copy(clipboard, text))
    }

    // ---------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------

    /// Route one input event and report what the host must do.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Vec<Effect>> {
        match event {
            UiEvent::QueryEdited { text, at } => {
                self.edit_query(&text, at);
                Ok(Vec::new())
            }
            UiEvent::Tick { at } => Ok(self.tick(at).map(filter_effect).into_iter().collect()),
            UiEvent::CheckboxToggled {
                show_success,
                show_error,
            } => Ok(self
                .set_status_filter(show_success, show_error)
                .map(filter_effect)
                .into_iter()
                .collect()),
            UiEvent::EntryClicked {
                index,
                target: ClickTarget::Star,
            } => {
                let starred = self.toggle_star(index)?;
                Ok(vec![Effect::StarToggled { index, starred }])
            }
            UiEvent::EntryClicked {
                index,
                target: ClickTarget::Body,
            } => self.select(index),
            UiEvent::PeekClicked { index } => self.select_from_peek(index),
            UiEvent::Intersection(changes) => self.on_viewport_intersection(&changes),
            UiEvent::SortRequested(key) => {
                self.sort_by(key);
                Ok(vec![Effect::Reordered(key)])
            }
        }
    }

    // ---------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------

    pub fn input(&self) -> &ReportInput {
        &self.input
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: TestIndex) -> Result<&EntryItem> {
        self.entries.get(index.get()).ok_or(ViewError::UnknownIndex {
            index,
            len: self.entries.len(),
        })
    }

    pub fn peek(&self, index: TestIndex) -> Result<&PeekItem> {
        self.pair(index).map(|(_, peek)| peek)
    }

    /// Entry and peek item sharing `index`.
    pub fn pair(&self, index: TestIndex) -> Result<(&EntryItem, &PeekItem)> {
        let entry = self.entry(index)?;
        let peek = self
            .peeks
            .get(index.get())
            .filter(|p| p.index() == index)
            .ok_or(ViewError::Unpaired { index })?;
        Ok((entry, peek))
    }

    fn pair_mut(&mut self, index: TestIndex) -> Result<(&mut EntryItem, &mut PeekItem)> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index.get())
            .ok_or(ViewError::UnknownIndex { index, len })?;
        let peek = self
            .peeks
            .get_mut(index.get())
            .filter(|p| p.index() == index)
            .ok_or(ViewError::Unpaired { index })?;
        Ok((entry, peek))
    }

    pub fn entry_by_id(&self, test_id: &str) -> Option<&EntryItem> {
        self.entries.iter().find(|e| e.test_id() == test_id)
    }

    /// Entries in explorer display order.
    pub fn entries_in_order(&self) -> impl Iterator<Item = &EntryItem> {
        self.entry_order.iter().map(|i| &self.entries[i.get()])
    }

    /// Peek items in strip display order.
    pub fn peeks_in_order(&self) -> impl Iterator<Item = &PeekItem> {
        self.peek_order.iter().map(|i| &self.peeks[i.get()])
    }

    pub fn rendered_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_rendered()).count()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_visible()).count()
    }

    pub fn selected(&self) -> Option<TestIndex> {
        self.selected
    }

    /// Text currently in the search input, applied or not.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn checkboxes_enabled(&self) -> bool {
        self.search_error.is_none()
    }

    /// Criteria of the filter in effect.
    pub fn criteria(&self) -> &FilterCriteria {
        self.filter.criteria()
    }

    pub fn last_stats(&self) -> &FilterStats {
        &self.last_stats
    }

    pub fn has_pending_query(&self) -> bool {
        self.query_debounce.is_pending()
    }

    /// When the host should send the next [`UiEvent::Tick`].
    pub fn query_deadline(&self) -> Option<Instant> {
        self.query_debounce.deadline()
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailPanel> {
        self.detail.as_mut()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Verify pairing, selection and render invariants.
    pub fn check_invariants(&self) -> Result<()> {
        let violation = |msg: String| Err(ViewError::InvariantViolation(msg));
        if self.entries.len() != self.peeks.len() {
            return violation(format!(
                "{} entries but {} peek items",
                self.entries.len(),
                self.peeks.len()
            ));
        }
        let mut selected = 0;
        for (i, entry) in self.entries.iter().enumerate() {
            let index = TestIndex(i);
            let (_, peek) = self.pair(index)?;
            if entry.index() != index || peek.test_id() != entry.test_id() {
                return violation(format!("pair {index} is mismatched"));
            }
            if peek.is_selected() != entry.is_selected()
                || peek.is_entry_visible() != entry.is_visible()
                || peek.is_entry_in_viewport() != entry.is_in_viewport()
            {
                return violation(format!("peek item {index} does not mirror its entry"));
            }
            if entry.is_rendered() != entry.is_in_viewport() {
                return violation(format!("entry {index} content disagrees with viewport"));
            }
            if entry.is_selected() {
                selected += 1;
                if self.selected != Some(index) {
                    return violation(format!("entry {index} selected behind the coordinator"));
                }
            }
        }
        if selected != usize::from(self.selected.is_some()) {
            return violation(format!("{selected} entries are selected"));
        }
        if self.detail.as_ref().map(DetailPanel::index) != self.selected {
            return violation("detail panel does not match the selection".to_string());
        }
        for order in [&self.entry_order, &self.peek_order] {
            let mut seen = vec![false; self.entries.len()];
            for index in order {
                match seen.get_mut(index.get()) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return violation(format!("display order repeats or overflows at {index}")),
                }
            }
            if seen.iter().any(|s| !s) {
                return violation("display order is missing items".to_string());
            }
        }
        Ok(())
    }
}

fn filter_effect(outcome: FilterOutcome) -> Effect {
    match outcome {
        FilterOutcome::Applied(stats) => Effect::FilterApplied(stats),
        FilterOutcome::Rejected { error } => Effect::FilterRejected { error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_common::test_utils::{five_test_fixture, InputBuilder};
    use std::time::Duration;

    fn state() -> ViewState {
        ViewState::new(Arc::new(five_test_fixture()), ViewConfig::default()).unwrap()
    }

    fn index_of(state: &ViewState, id: &str) -> TestIndex {
        state.entry_by_id(id).unwrap().index()
    }

    #[test]
    fn test_indexes_follow_sorted_ids() {
        let s = state();
        let ids: Vec<&str> = s.entries_in_order().map(|e| e.test_id()).collect();
        assert_eq!(
            ids,
            vec![
                "alpha/fail_one",
                "alpha/pass_one",
                "beta/fail_two",
                "beta/pass_two",
                "gamma/pass_three"
            ]
        );
        assert_eq!(s.last_stats().total(), 5);
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_select_toggle() {
        let mut s = state();
        let i = TestIndex(1);
        let effects = s.select(i).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::DetailOpened(i),
                Effect::ScrollIntoView {
                    container: Container::Peek,
                    index: i
                }
            ]
        );
        assert!(s.peek(i).unwrap().is_selected());
        assert_eq!(s.select(i).unwrap(), vec![Effect::DetailClosed]);
        assert_eq!(s.selected(), None);
        assert!(s.detail().is_none());
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_select_moves_selection() {
        let mut s = state();
        s.select(TestIndex(0)).unwrap();
        let effects = s.select(TestIndex(3)).unwrap();
        assert_eq!(effects[0], Effect::DetailClosed);
        assert_eq!(effects[1], Effect::DetailOpened(TestIndex(3)));
        assert!(!s.entry(TestIndex(0)).unwrap().is_selected());
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_set_selected_twice_is_conflict() {
        let mut s = state();
        s.set_selected(TestIndex(0)).unwrap();
        let err = s.set_selected(TestIndex(1)).unwrap_err();
        assert!(matches!(err, ViewError::SelectionConflict { .. }));
    }

    #[test]
    fn test_unknown_index_is_error() {
        let mut s = state();
        let err = s.select(TestIndex(99)).unwrap_err();
        assert!(err.is_programming_error());
        assert!(s
            .on_viewport_intersection(&[IntersectionChange::entered(TestIndex(99))])
            .is_err());
    }

    #[test]
    fn test_peek_click_on_hidden_is_ignored() {
        let mut s = state();
        s.set_filter("fail", true, true);
        let pass = index_of(&s, "alpha/pass_one");
        assert!(s.select_from_peek(pass).unwrap().is_empty());
        assert_eq!(s.selected(), None);

        // The list still selects it.
        s.select(pass).unwrap();
        assert_eq!(s.selected(), Some(pass));
    }

    #[test]
    fn test_peek_select_scrolls_explorer() {
        let mut s = state();
        let effects = s.select_from_peek(TestIndex(2)).unwrap();
        assert!(effects.contains(&Effect::ScrollIntoView {
            container: Container::Explorer,
            index: TestIndex(2)
        }));
    }

    #[test]
    fn test_viewport_independent_of_filter() {
        let mut s = state();
        s.set_filter("gamma", true, true);
        let hidden = index_of(&s, "alpha/fail_one");
        let effects = s
            .on_viewport_intersection(&[IntersectionChange::entered(hidden)])
            .unwrap();
        assert_eq!(effects, vec![Effect::EntryMaterialized(hidden)]);
        let entry = s.entry(hidden).unwrap();
        assert!(entry.is_rendered());
        assert!(!entry.is_visible());
        assert!(s.peek(hidden).unwrap().is_entry_in_viewport());
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_out_of_order_batches() {
        let mut s = state();
        let i = TestIndex(0);
        s.on_viewport_intersection(&[IntersectionChange::left(i), IntersectionChange::entered(i)])
            .unwrap();
        assert!(s.entry(i).unwrap().is_rendered());
        s.on_viewport_intersection(&[IntersectionChange::entered(i), IntersectionChange::left(i)])
            .unwrap();
        assert!(!s.entry(i).unwrap().is_rendered());
    }

    #[test]
    fn test_star_does_not_select() {
        let mut s = state();
        let effects = s
            .dispatch(UiEvent::EntryClicked {
                index: TestIndex(2),
                target: ClickTarget::Star,
            })
            .unwrap();
        assert_eq!(
            effects,
            vec![Effect::StarToggled {
                index: TestIndex(2),
                starred: true
            }]
        );
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_debounced_query() {
        let mut s = state();
        let t0 = Instant::now();
        s.dispatch(UiEvent::QueryEdited {
            text: "fa".to_string(),
            at: t0,
        })
        .unwrap();
        s.dispatch(UiEvent::QueryEdited {
            text: "fail".to_string(),
            at: t0 + Duration::from_millis(120),
        })
        .unwrap();
        assert!(s
            .dispatch(UiEvent::Tick {
                at: t0 + Duration::from_millis(250)
            })
            .unwrap()
            .is_empty());
        let effects = s
            .dispatch(UiEvent::Tick {
                at: t0 + Duration::from_millis(320),
            })
            .unwrap();
        match &effects[..] {
            [Effect::FilterApplied(stats)] => {
                assert_eq!(stats.errors, 2);
                assert_eq!(stats.successes, 0);
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert_eq!(s.criteria().query, "fail");
        assert_eq!(s.query_deadline(), None);
    }

    #[test]
    fn test_query_deadline_schedules_tick() {
        let mut s = state();
        let t0 = Instant::now();
        assert_eq!(s.query_deadline(), None);
        s.edit_query("beta", t0);
        let due = s.query_deadline().unwrap();
        assert_eq!(due, t0 + s.config().debounce_window());
        assert!(s.tick(due - Duration::from_millis(1)).is_none());
        let outcome = s.tick(due).unwrap();
        assert_eq!(outcome.stats().unwrap().total(), 2);
    }

    #[test]
    fn test_checkboxes_ignored_while_disabled() {
        let mut s = state();
        s.set_filter("(unterminated", true, true);
        assert!(!s.checkboxes_enabled());
        assert!(s
            .dispatch(UiEvent::CheckboxToggled {
                show_success: false,
                show_error: true
            })
            .unwrap()
            .is_empty());
        assert_eq!(s.visible_count(), 5);
    }

    #[test]
    fn test_checkbox_uses_current_text() {
        let mut s = state();
        s.set_filter("beta", true, true);
        let outcome = s.set_status_filter(true, false).unwrap();
        assert_eq!(outcome.stats().unwrap().total(), 1);
    }

    #[test]
    fn test_deselect_closes_frame() {
        let input = InputBuilder::new().test("only", false).build();
        let mut s = ViewState::new(Arc::new(input), ViewConfig::default()).unwrap();
        s.select(TestIndex(0)).unwrap();
        s.toggle_frame(FrameSlot::Golden).unwrap();
        assert!(s.detail().unwrap().frames().is_open(FrameSlot::Golden));
        s.select(TestIndex(0)).unwrap();
        assert!(s.detail().is_none());
        assert!(matches!(
            s.toggle_frame(FrameSlot::Golden),
            Err(ViewError::NoSelection)
        ));
    }

    #[test]
    fn test_container_width_retruncates() {
        let input = InputBuilder::new()
            .test("a_fairly_long_directory_name/and_a_long_test_name", true)
            .build();
        let mut s = ViewState::new(Arc::new(input), ViewConfig::default()).unwrap();
        s.on_viewport_intersection(&[IntersectionChange::entered(TestIndex(0))])
            .unwrap();
        let full = s.entry(TestIndex(0)).unwrap().content().unwrap().id_text.clone();
        assert!(!full.contains("..."));

        s.set_container_width(180.0).unwrap();
        let capped = &s.entry(TestIndex(0)).unwrap().content().unwrap().id_text;
        assert_eq!(capped.chars().count(), 20);
        assert!(s.set_container_width(0.0).is_err());
    }
}
