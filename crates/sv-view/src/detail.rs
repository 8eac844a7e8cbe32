//! Detail panel view model.
//!
//! Built fresh from the input each time an entry becomes selected and
//! dropped when the selection is cleared. The panel owns the inline frame
//! viewer, so closing the panel closes any open frame with it.

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::frame::{FrameOpener, FrameSlot, FrameTransition, InlineFrameViewer};
use crate::item::StatusGlyph;
use serde::Serialize;
use sv_common::format::{kb_as_mb, mean_stddev};
use sv_common::{ReportInput, TaskRecord, TestIndex, TestRecord};

/// Visual class of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    #[default]
    Plain,
    Good,
    Bad,
}

impl CellClass {
    pub fn for_ok(ok: bool) -> Self {
        if ok {
            CellClass::Good
        } else {
            CellClass::Bad
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Cell {
    pub text: String,
    pub tooltip: Option<String>,
    pub class: CellClass,
    pub opener: Option<FrameOpener>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_class(mut self, class: CellClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_opener(mut self, slot: FrameSlot, src: &str) -> Self {
        self.opener = Some(FrameOpener {
            slot,
            src: src.to_string(),
        });
        self
    }

    /// `yes`/`no` with the matching class, or `n/a` when unknown.
    fn flag(value: Option<bool>) -> Self {
        match value {
            Some(true) => Cell::text("yes").with_class(CellClass::Good),
            Some(false) => Cell::text("no").with_class(CellClass::Bad),
            None => Cell::text("n/a"),
        }
    }
}

/// A labelled row of the metadata or aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledRow {
    pub label: &'static str,
    pub value: Cell,
    /// Trailing status glyph, used by the success-count row.
    pub glyph: Option<StatusGlyph>,
}

impl LabelledRow {
    fn new(label: &'static str, value: Cell) -> Self {
        Self {
            label,
            value,
            glyph: None,
        }
    }
}

/// Three-segment bar placing one task on the run's wall-clock span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineBar {
    /// Idle width before the task starts.
    pub idle_before: f64,
    /// Width of the task itself, at least the configured minimum.
    pub active: f64,
    pub idle_after: f64,
}

impl TimelineBar {
    pub const IDLE_COLOR: &'static str = "#cccccc";
    pub const ACTIVE_COLOR: &'static str = "#557ecc";

    /// Place `[start, end]` (offsets from the run start, ms) on a bar of
    /// `length` pixels spanning `whole` ms.
    pub fn compute(start: f64, end: f64, whole: f64, length: f64, min_segment: f64) -> Self {
        let scale = |t: f64| {
            if whole > 0.0 {
                (t / whole * length).clamp(0.0, length)
            } else {
                0.0
            }
        };
        let x_start = scale(start).min(length - min_segment).max(0.0);
        let mut x_finish = scale(end);
        if x_finish - x_start < min_segment {
            x_finish = x_start + min_segment;
        }
        let x_finish = x_finish.min(length);
        TimelineBar {
            idle_before: x_start,
            active: x_finish - x_start,
            idle_after: length - x_finish,
        }
    }

    pub fn length(&self) -> f64 {
        self.idle_before + self.active + self.idle_after
    }
}

/// One attempt of the selected test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    /// 1-based attempt number.
    pub ordinal: usize,
    pub result: Cell,
    pub runtime: Cell,
    pub maxrss: Cell,
    pub exit: Cell,
    pub exit_ok: Cell,
    pub stdout: Cell,
    pub stdout_diff: Cell,
    pub stdout_ok: Cell,
    pub timeline: TimelineBar,
}

impl TaskRow {
    fn build(position: usize, task: &TaskRecord, input: &ReportInput, config: &ViewConfig) -> Self {
        let times = &task.times_ms;
        let runtime = Cell::text(format!("{:.1} ms", times.cpu));
        let runtime = match times.cpu_wall_percent() {
            Some(pct) => runtime.with_tooltip(format!("{pct:.0}% of wall time")),
            None => runtime,
        };
        let stdout = match &task.stdout.stdout_link {
            Some(link) => Cell::text("yes").with_opener(FrameSlot::Stdout { task: position }, link),
            None => Cell::text("no"),
        };
        let stdout_diff = match &task.stdout.diff_link {
            Some(link) => Cell::text("yes").with_opener(FrameSlot::Diff { task: position }, link),
            None => Cell::text("no"),
        };

        TaskRow {
            ordinal: position + 1,
            result: Cell::text(if task.ok { "good" } else { "bad" })
                .with_class(CellClass::for_ok(task.ok)),
            runtime,
            maxrss: Cell::text(kb_as_mb(task.maxrss_kb))
                .with_tooltip(format!("{:.0} KB", task.maxrss_kb)),
            exit: Cell::text(task.exit.describe()),
            exit_ok: Cell::flag(Some(task.exit.ok)),
            stdout,
            stdout_diff,
            stdout_ok: Cell::flag(task.stdout.ok),
            timeline: TimelineBar::compute(
                times.wall_start - input.start_time,
                times.wall_end - input.start_time,
                input.whole_time,
                config.timeline_length_px,
                config.timeline_min_segment_px,
            ),
        }
    }
}

/// Everything shown for the selected test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    index: TestIndex,
    test_id: String,
    status: StatusGlyph,
    command: String,
    command_expanded: bool,
    metadata: Vec<LabelledRow>,
    aggregate: Vec<LabelledRow>,
    tasks: Vec<TaskRow>,
    frames: InlineFrameViewer,
}

impl DetailPanel {
    /// Build the panel of `test_id`. Returns `UnknownIndex` when the input
    /// has no such test.
    pub fn build(
        input: &ReportInput,
        index: TestIndex,
        test_id: &str,
        config: &ViewConfig,
    ) -> Result<Self> {
        let record = input.test(test_id).ok_or(ViewError::UnknownIndex {
            index,
            len: input.test_count(),
        })?;
        let tasks = record
            .task_indexes
            .iter()
            .enumerate()
            .filter_map(|(n, &p)| input.task_results.get(p).map(|t| (n, t)))
            .map(|(n, task)| TaskRow::build(n, task, input, config))
            .collect();

        Ok(DetailPanel {
            index,
            test_id: test_id.to_string(),
            status: StatusGlyph::for_outcome(
                record.ok,
                record.task_count(),
                record.task_error_count,
            ),
            command: record.command.clone(),
            command_expanded: false,
            metadata: metadata_rows(record),
            aggregate: aggregate_rows(record),
            tasks,
            frames: InlineFrameViewer::new(),
        })
    }

    pub fn index(&self) -> TestIndex {
        self.index
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn status(&self) -> StatusGlyph {
        self.status
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_command_expanded(&self) -> bool {
        self.command_expanded
    }

    pub fn toggle_command_expansion(&mut self) -> bool {
        self.command_expanded = !self.command_expanded;
        self.command_expanded
    }

    pub fn metadata(&self) -> &[LabelledRow] {
        &self.metadata
    }

    pub fn aggregate(&self) -> &[LabelledRow] {
        &self.aggregate
    }

    pub fn tasks(&self) -> &[TaskRow] {
        &self.tasks
    }

    pub fn frames(&self) -> &InlineFrameViewer {
        &self.frames
    }

    /// Every opener on the panel, in display order.
    pub fn openers(&self) -> impl Iterator<Item = &FrameOpener> {
        let meta = self.metadata.iter().filter_map(|r| r.value.opener.as_ref());
        let tasks = self.tasks.iter().flat_map(|t| {
            [t.stdout.opener.as_ref(), t.stdout_diff.opener.as_ref()]
                .into_iter()
                .flatten()
        });
        meta.chain(tasks)
    }

    /// Activate the opener of `slot`.
    pub fn toggle_frame(&mut self, slot: FrameSlot) -> Result<FrameTransition> {
        let opener = self
            .openers()
            .find(|o| o.slot == slot)
            .cloned()
            .ok_or(ViewError::NoFrameSource { slot })?;
        Ok(self.frames.toggle(opener))
    }

    pub fn close_frame(&mut self) -> Option<FrameSlot> {
        self.frames.close()
    }
}

fn metadata_rows(record: &TestRecord) -> Vec<LabelledRow> {
    let stdout = match &record.golden_file {
        Some(golden) => Cell::text("yes").with_opener(FrameSlot::Golden, golden),
        None => Cell::text("no"),
    };
    let timeout = if record.timeout > 0.0 {
        Cell::text(format!("{:.0} ms", record.timeout))
    } else {
        Cell::text("none")
    };
    vec![
        LabelledRow::new("expected exit:", Cell::text(record.exit.to_string())),
        LabelledRow::new("expected stdout:", stdout),
        LabelledRow::new("proc. timeout:", timeout),
    ]
}

fn aggregate_rows(record: &TestRecord) -> Vec<LabelledRow> {
    let runtime = record.runtime_stat;
    let maxrss = record.maxrss_stat;
    let mut success = LabelledRow::new(
        "success count:",
        Cell::text(format!(
            "{} out of {}",
            record.task_success_count(),
            record.task_count()
        ))
        .with_class(CellClass::for_ok(record.ok)),
    );
    success.glyph = Some(StatusGlyph::for_outcome(
        record.ok,
        record.task_count(),
        record.task_error_count,
    ));
    vec![
        LabelledRow::new(
            "proc. runtime:",
            Cell::text(mean_stddev((runtime.mean, runtime.stddev), "ms")),
        ),
        LabelledRow::new(
            "max. rss.:",
            Cell::text(mean_stddev((maxrss.mean, maxrss.stddev), "KB")),
        ),
        success,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_common::test_utils::InputBuilder;

    fn panel(id: &str) -> DetailPanel {
        let input = InputBuilder::new()
            .test_with_attempts("flaky", &[true, false, true])
            .test("solid", true)
            .build();
        DetailPanel::build(&input, TestIndex(0), id, &ViewConfig::default()).unwrap()
    }

    #[test]
    fn test_timeline_proportional() {
        let bar = TimelineBar::compute(40.0, 80.0, 160.0, 160.0, 3.0);
        assert_eq!(bar.idle_before, 40.0);
        assert_eq!(bar.active, 40.0);
        assert_eq!(bar.idle_after, 80.0);
    }

    #[test]
    fn test_timeline_zero_duration_gets_floor() {
        let bar = TimelineBar::compute(50.0, 50.0, 100.0, 160.0, 3.0);
        assert_eq!(bar.idle_before, 80.0);
        assert_eq!(bar.active, 3.0);
        assert_eq!(bar.length(), 160.0);
    }

    #[test]
    fn test_timeline_task_at_end_stays_on_bar() {
        let bar = TimelineBar::compute(100.0, 100.0, 100.0, 160.0, 3.0);
        assert_eq!(bar.idle_before, 157.0);
        assert_eq!(bar.active, 3.0);
        assert_eq!(bar.idle_after, 0.0);
    }

    #[test]
    fn test_timeline_zero_whole_time() {
        let bar = TimelineBar::compute(0.0, 0.0, 0.0, 160.0, 3.0);
        assert_eq!(bar.active, 3.0);
    }

    #[test]
    fn test_panel_rows() {
        let p = panel("flaky");
        assert_eq!(p.status(), StatusGlyph::Flaky);
        assert_eq!(p.tasks().len(), 3);
        assert_eq!(p.tasks()[1].result.text, "bad");
        assert_eq!(p.tasks()[1].result.class, CellClass::Bad);
        assert_eq!(p.tasks()[0].runtime.tooltip.as_deref(), Some("10% of wall time"));
        assert_eq!(p.tasks()[0].maxrss.text, "1.0 MB");

        let labels: Vec<&str> = p.metadata().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["expected exit:", "expected stdout:", "proc. timeout:"]);
        assert_eq!(p.metadata()[0].value.text, "return 0");
        assert_eq!(p.metadata()[2].value.text, "1000 ms");

        let success = &p.aggregate()[2];
        assert_eq!(success.value.text, "2 out of 3");
        assert_eq!(success.glyph, Some(StatusGlyph::Flaky));
    }

    #[test]
    fn test_openers_cover_golden_stdout_and_diff() {
        let p = panel("flaky");
        // golden + 3 stdout + 1 diff
        assert_eq!(p.openers().count(), 5);
    }

    #[test]
    fn test_toggle_frame() {
        let mut p = panel("flaky");
        p.toggle_frame(FrameSlot::Golden).unwrap();
        p.toggle_frame(FrameSlot::Diff { task: 1 }).unwrap();
        assert!(p.frames().is_open(FrameSlot::Diff { task: 1 }));
        assert!(!p.frames().is_open(FrameSlot::Golden));

        let err = p.toggle_frame(FrameSlot::Diff { task: 0 }).unwrap_err();
        assert_eq!(err.code(), 25);
    }

    #[test]
    fn test_command_expansion() {
        let mut p = panel("solid");
        assert!(!p.is_command_expanded());
        assert!(p.toggle_command_expansion());
        assert!(p.command().contains("./solid"));
    }
}
