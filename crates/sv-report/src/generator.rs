//! Report generator implementation.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::favicon;
use crate::sections::*;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use sv_common::{ReportInput, TestIndex};
use sv_view::{
    Cell, DetailPanel, FrameSlot, LabelledRow, SortKey, TaskRow, TimelineBar, ViewConfig,
    ViewState,
};
use tracing::{debug, info};

/// Complete report data structure.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    /// Report configuration.
    pub config: ReportConfig,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Status bar, counters, breadcrumbs.
    pub summary: SummarySection,
    /// Explorer list and peek strip.
    pub explorer: ExplorerSection,
    /// Detail panel of the selected test.
    pub detail: Option<DetailPanel>,
}

impl ReportData {
    /// Get the report title.
    pub fn title(&self) -> &str {
        &self.summary.title
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render `input` as it currently appears in `state`.
    pub fn generate(&self, input: &ReportInput, state: &ViewState) -> Result<String> {
        let data = self.collect(input, state)?;
        self.render_html(&data)
    }

    /// Load an input document and render its initial view.
    pub fn generate_from_path(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "Generating report from input file");
        let input = Arc::new(ReportInput::from_path(path)?);
        let state = ViewState::new(Arc::clone(&input), ViewConfig::default())?;
        self.generate(&input, &state)
    }

    /// Snapshot the input and view state into report data.
    pub fn collect(&self, input: &ReportInput, state: &ViewState) -> Result<ReportData> {
        self.config.validate()?;
        check_state_matches(input, state)?;
        Ok(ReportData {
            config: self.config.clone(),
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            summary: SummarySection::from_input(input, self.config.title.as_deref()),
            explorer: ExplorerSection::from_state(state),
            detail: state.detail().cloned(),
        })
    }

    /// Render already-collected data.
    pub fn render(&self, data: &ReportData) -> Result<String> {
        self.render_html(data)
    }

    fn render_html(&self, data: &ReportData) -> Result<String> {
        let html = self.generate_html(data)?;

        let output = if cfg!(debug_assertions) || !self.config.minify {
            html
        } else {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        };

        info!(
            bytes = output.len(),
            title = %data.title(),
            tests = data.summary.test_count,
            rendered = data.explorer.rendered_count(),
            "Report generated"
        );

        Ok(output)
    }

    fn generate_html(&self, data: &ReportData) -> Result<String> {
        let summary = &data.summary;
        let layout = &self.config.layout;
        let data_script = if self.config.embed_data {
            let json = serde_json::to_string(&EmbeddedData {
                summary,
                explorer: &data.explorer,
            })?;
            format!(
                r#"<script type="application/json" id="report-data">{}</script>"#,
                json.replace('<', "\\u003c")
            )
        } else {
            String::new()
        };

        Ok(format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="sv-report {version}">
    <meta name="robots" content="noindex, nofollow">
    <link rel="icon" href="{favicon}">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f5f5f5;
            --text-primary: #202124;
            --text-secondary: #5f6368;
            --border-color: #dadce0;
            --ok-color: #2e7d32;
            --error-color: #c62828;
        }}
        [data-color-mode="dark"] {{
            --bg-primary: #202124;
            --bg-secondary: #2d2e30;
            --text-primary: #e8eaed;
            --text-secondary: #9aa0a6;
            --border-color: #5f6368;
            --ok-color: #81c995;
            --error-color: #f28b82;
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            margin: 0;
        }}
        .status_bar_ok {{ color: var(--ok-color); }}
        .status_bar_error {{ color: var(--error-color); }}
        #status_bar {{ display: flex; gap: 0.5rem; align-items: center; padding: 0.5rem 1rem; }}
        #test_directory_breadcrumbs {{ display: flex; gap: 0.25rem; color: var(--text-secondary); }}
        #entries {{ list-style: none; margin: 0; padding: 0; height: {explorer_height}px; overflow-y: auto; }}
        .test_entry {{ display: flex; align-items: center; white-space: nowrap; overflow: hidden; cursor: pointer; }}
        .test_entry:not([te-visible]) {{ display: none; }}
        .test_entry[te-user-selected] {{ background-color: var(--bg-secondary); }}
        .test_entry .tooltip {{ display: none; }}
        .test_entry:hover .tooltip {{ display: block; position: absolute; }}
        #entries_peek_icons_view {{ display: flex; flex-wrap: wrap; }}
        .peek_icon {{ font-size: {peek_px}px; width: {peek_px}px; height: {peek_px}px; cursor: pointer; }}
        .peek_icon:not([data-vis]) {{ opacity: 0.2; cursor: default; }}
        .peek_icon[data-slt] {{ outline: 1px solid var(--text-primary); }}
        .peek_icon[data-ivw] {{ background-color: var(--bg-secondary); }}
        .good {{ color: var(--ok-color); }}
        .bad {{ color: var(--error-color); }}
        .search_bar_error {{ outline: 2px solid var(--error-color); }}
        .command:not(.expanded) pre {{ max-height: 1.5em; overflow: hidden; }}
        #details_frame {{ width: 100%; height: {frame_height}px; border: 1px solid var(--border-color); }}
        @media print {{
            .no-print {{ display: none !important; }}
        }}
    </style>
</head>
<body>
    <header>
{header}
{breadcrumbs}
{stats}
{additional_info}
    </header>
    <main>
{explorer}
{details}
    </main>
    <footer class="no-print">Generated {generated_at} by sv-report {version}</footer>
    {data_script}
    <script>
        (function () {{
            var root = document.documentElement;
            if (root.className) {{
                root.setAttribute('data-color-mode', root.className);
                return;
            }}
            var stored = null;
            try {{ stored = window.localStorage.getItem('{color_mode_key}'); }} catch (e) {{}}
            var dark = stored === 'dark' ||
                (stored === null && window.matchMedia &&
                 window.matchMedia('(prefers-color-scheme: dark)').matches);
            root.setAttribute('data-color-mode', dark ? 'dark' : 'light');
        }})();
    </script>
</body>
</html>"##,
            theme_class = self.config.theme.css_class(),
            title = html_escape(data.title()),
            version = html_escape(&data.generator_version),
            favicon = favicon::data_url(summary.all_ok),
            explorer_height = layout.explorer_height_px,
            peek_px = layout.peek_icon_px,
            frame_height = layout.frame_height_px,
            header = self.generate_status_bar(summary),
            breadcrumbs = self.generate_breadcrumbs(summary),
            stats = self.generate_stats(summary),
            additional_info = self.generate_additional_info(summary),
            explorer = self.generate_explorer(&data.explorer),
            details = self.generate_details(data.detail.as_ref()),
            generated_at = data.generated_at.format("%Y-%m-%d %H:%M UTC"),
            data_script = data_script,
            color_mode_key = sv_view::prefs::COLOR_MODE_KEY,
        ))
    }

    fn generate_status_bar(&self, summary: &SummarySection) -> String {
        format!(
            r##"        <h1><span id="test_title">{title}</span></h1>
        <div id="status_bar" class="{class}">
            <div id="status_bar_icon"><span class="material-icons {class}">{icon}</span></div>
            <div id="status_bar_status_message" class="{class}">{label}</div>
            <span id="test_timing_message">Complete at {completed_at} <b> in {elapsed}</b></span>
            <span id="master_log_link"><a href="{master_log}">master log</a></span>
        </div>"##,
            title = html_escape(&summary.title),
            class = summary.status_class(),
            icon = summary.status_icon(),
            label = summary.status_label(),
            completed_at = html_escape(&summary.completed_at),
            elapsed = summary.elapsed(),
            master_log = html_escape(&summary.master_log),
        )
    }

    fn generate_breadcrumbs(&self, summary: &SummarySection) -> String {
        let separator = format!(
            r#"<div class="breadcrumb_component">{}</div>"#,
            html_escape(&self.config.breadcrumb_separator)
        );
        let parts: Vec<String> = summary
            .breadcrumbs()
            .into_iter()
            .map(|part| {
                format!(
                    r#"<div class="breadcrumb_component">{}</div>"#,
                    html_escape(part)
                )
            })
            .collect();
        format!(
            r#"        <div id="test_directory_breadcrumbs" title="{path}">{parts}<button class="material-icons copy_button" data-copy="{path}">content_copy</button></div>"#,
            path = html_escape(&summary.exec_path),
            parts = parts.join(&separator),
        )
    }

    fn generate_stats(&self, summary: &SummarySection) -> String {
        format!(
            r#"        <div id="test_result_stats">
            <div class="stat"><div id="test_result_stats_total">{total}</div><div class="stat-label">tests</div></div>
            <div class="stat good"><div id="test_result_stats_successes">{successes}</div><div class="stat-label">passed</div></div>
            <div class="stat bad"><div id="test_result_stats_errors">{errors}</div><div class="stat-label">failed</div></div>
            <div class="stat"><div id="task_result_stats">{task_errors} / {tasks}</div><div class="stat-label">failed attempts</div></div>
        </div>"#,
            total = summary.test_count,
            successes = summary.success_count,
            errors = summary.test_error_count,
            tasks = summary.task_count,
            task_errors = summary.task_error_count,
        )
    }

    fn generate_additional_info(&self, summary: &SummarySection) -> String {
        match &summary.additional_info {
            None => String::new(),
            Some(lines) => {
                let body: Vec<String> = lines.iter().map(|l| html_escape(l)).collect();
                format!(
                    r#"        <pre id="additional_info">{}</pre>"#,
                    body.join("\n")
                )
            }
        }
    }

    fn generate_explorer(&self, explorer: &ExplorerSection) -> String {
        let search_class = if explorer.search_error.is_some() {
            r#" class="search_bar_error""#
        } else {
            ""
        };
        let search_title = explorer
            .search_error
            .as_deref()
            .map(|e| format!(r#" title="{}""#, html_escape(e)))
            .unwrap_or_default();
        let disabled = if explorer.checkboxes_enabled {
            ""
        } else {
            " disabled"
        };
        let checked = |on: bool| if on { " checked" } else { "" };
        let sort_options: Vec<String> = SortKey::ALL
            .iter()
            .map(|key| {
                let selected = if *key == explorer.sort_key {
                    " selected"
                } else {
                    ""
                };
                format!(
                    r#"<option value="{label}"{selected}>{label}</option>"#,
                    label = key.label()
                )
            })
            .collect();
        let entries: Vec<String> = explorer.entries.iter().map(|e| self.generate_entry(e)).collect();
        let peeks: Vec<String> = explorer.peeks.iter().map(|p| self.generate_peek(p)).collect();

        format!(
            r##"        <section id="explorer">
            <div id="explorer_controls" class="no-print">
                <input id="search_bar" type="search" placeholder="Search test IDs (regex)" value="{search}"{search_class}{search_title}>
                <label><input id="show_success" type="checkbox"{show_success}{disabled}> passed</label>
                <label><input id="show_error" type="checkbox"{show_error}{disabled}> failed</label>
                <select id="sort_by_what">{sort_options}</select>
            </div>
            <div id="explorer_stats">{stats}</div>
            <ul id="entries" data-viewport-margin="{margin}%">
{entries}
            </ul>
        </section>
        <section id="entries_peek">
            <div id="entries_peek_icons_view">{peeks}</div>
        </section>"##,
            search = html_escape(&explorer.search_text),
            search_class = search_class,
            search_title = search_title,
            show_success = checked(explorer.show_success),
            show_error = checked(explorer.show_error),
            disabled = disabled,
            sort_options = sort_options.join(""),
            margin = explorer.viewport_margin_pct,
            stats = html_escape(&explorer.stats_message),
            entries = entries.join("\n"),
            peeks = peeks.join(""),
        )
    }

    fn generate_entry(&self, row: &EntryRow) -> String {
        let body = match &row.content {
            None => String::new(),
            Some(content) => {
                let lines: Vec<String> = content
                    .tooltip
                    .lines
                    .iter()
                    .map(|l| html_escape(l))
                    .collect();
                format!(
                    r#"<span class="material-icons status {status}">{status_icon}</span><span class="test_id">{id_text}</span><span class="material-icons star">{star_icon}</span><div class="tooltip"><b>{title}</b><br>{lines}</div>"#,
                    status = serde_plain_name(&content.status),
                    status_icon = content.status.icon(),
                    id_text = html_escape(&content.id_text),
                    star_icon = content.star.icon(),
                    title = html_escape(&content.tooltip.title),
                    lines = lines.join("<br>"),
                )
            }
        };
        format!(
            r#"                <li class="test_entry"{attrs} style="height:{height}px">{body}</li>"#,
            attrs = write_attributes(&row.attributes()),
            height = row.height_px,
        )
    }

    fn generate_peek(&self, row: &PeekRow) -> String {
        let class = if row.view.glyph == sv_view::PeekGlyph::Pass {
            "good"
        } else {
            "bad"
        };
        format!(
            r#"<span class="material-icons peek_icon {class}"{attrs} title="{tooltip}">{icon}</span>"#,
            attrs = write_attributes(&row.attributes()),
            tooltip = html_escape(&row.view.tooltip),
            icon = row.view.glyph.icon(),
        )
    }

    fn generate_details(&self, detail: Option<&DetailPanel>) -> String {
        let Some(panel) = detail else {
            return r#"        <section id="details" class="empty">Select a test to see its details.</section>"#
                .to_string();
        };

        let frame = match panel.frames().open_frame() {
            Some(opener) => format!(
                r#"<iframe id="details_frame" name="details_frame" data-frame="{key}" src="{src}"></iframe>"#,
                key = frame_key(opener.slot),
                src = html_escape(&opener.src),
            ),
            None => String::new(),
        };
        let expanded = if panel.is_command_expanded() {
            " expanded"
        } else {
            ""
        };

        format!(
            r##"        <section id="details" data-idx="{index}">
            <div id="details_header">
                <span class="material-icons status {status}">{status_icon}</span>
                <span id="details_test_id">{test_id}</span>
                <button class="material-icons copy_button" data-copy="test-id">content_copy</button>
            </div>
            <div class="command{expanded}">
                <pre>{command}</pre>
                <button class="material-icons copy_button" data-copy="command">content_copy</button>
                <button class="material-icons expand_button">{expand_icon}</button>
            </div>
            <table id="details_metadata">{metadata}</table>
            <table id="details_aggregate">{aggregate}</table>
            {tasks}
            {frame}
        </section>"##,
            index = panel.index(),
            status = serde_plain_name(&panel.status()),
            status_icon = panel.status().icon(),
            test_id = html_escape(panel.test_id()),
            expanded = expanded,
            command = html_escape(panel.command()),
            expand_icon = if panel.is_command_expanded() {
                "unfold_less"
            } else {
                "unfold_more"
            },
            metadata = self.generate_labelled_rows(panel.metadata(), panel),
            aggregate = self.generate_labelled_rows(panel.aggregate(), panel),
            tasks = self.generate_task_table(panel.tasks(), panel),
            frame = frame,
        )
    }

    fn generate_labelled_rows(&self, rows: &[LabelledRow], panel: &DetailPanel) -> String {
        rows.iter()
            .map(|row| {
                let glyph = row
                    .glyph
                    .map(|g| {
                        format!(
                            r#" <span class="material-icons {}">{}</span>"#,
                            serde_plain_name(&g),
                            g.icon()
                        )
                    })
                    .unwrap_or_default();
                format!(
                    "<tr><th>{}</th>{}</tr>",
                    html_escape(row.label),
                    self.generate_cell(&row.value, panel, &glyph)
                )
            })
            .collect()
    }

    fn generate_task_table(&self, tasks: &[TaskRow], panel: &DetailPanel) -> String {
        const HEADERS: [&str; 10] = [
            "#",
            "result",
            "runtime",
            "max. rss.",
            "exit",
            "exit ok",
            "stdout",
            "stdout diff",
            "stdout ok",
            "timeline",
        ];
        let header: String = HEADERS.iter().map(|h| format!("<th>{h}</th>")).collect();
        let rows: String = tasks
            .iter()
            .map(|task| {
                let cells = [
                    &task.result,
                    &task.runtime,
                    &task.maxrss,
                    &task.exit,
                    &task.exit_ok,
                    &task.stdout,
                    &task.stdout_diff,
                    &task.stdout_ok,
                ];
                let cells: String = cells
                    .iter()
                    .map(|c| self.generate_cell(c, panel, ""))
                    .collect();
                format!(
                    "<tr><td>{}</td>{}<td>{}</td></tr>",
                    task.ordinal,
                    cells,
                    self.generate_timeline(&task.timeline)
                )
            })
            .collect();
        format!(r#"<table id="details_tasks"><tr>{header}</tr>{rows}</table>"#)
    }

    fn generate_cell(&self, cell: &Cell, panel: &DetailPanel, suffix: &str) -> String {
        let class = match cell.class {
            sv_view::CellClass::Plain => String::new(),
            other => format!(r#" class="{}""#, serde_plain_name(&other)),
        };
        let title = cell
            .tooltip
            .as_deref()
            .map(|t| format!(r#" title="{}""#, html_escape(t)))
            .unwrap_or_default();
        let text = match &cell.opener {
            Some(opener) => {
                let open = if panel.frames().is_open(opener.slot) {
                    " open"
                } else {
                    ""
                };
                format!(
                    r#"<a class="frame_opener{open}" data-frame="{key}" href="{src}" target="details_frame">{text}</a>"#,
                    key = frame_key(opener.slot),
                    src = html_escape(&opener.src),
                    text = html_escape(&cell.text),
                )
            }
            None => html_escape(&cell.text),
        };
        format!("<td{class}{title}>{text}{suffix}</td>")
    }

    fn generate_timeline(&self, bar: &TimelineBar) -> String {
        format!(
            r#"<svg class="timeline" width="{len:.1}" height="8" viewBox="0 0 {len:.1} 8"><rect x="0" y="0" width="{before:.1}" height="8" fill="{idle}"/><rect x="{before:.1}" y="0" width="{active:.1}" height="8" fill="{busy}"/><rect x="{after_x:.1}" y="0" width="{after:.1}" height="8" fill="{idle}"/></svg>"#,
            len = bar.length(),
            before = bar.idle_before,
            active = bar.active,
            after_x = bar.idle_before + bar.active,
            after = bar.idle_after,
            idle = TimelineBar::IDLE_COLOR,
            busy = TimelineBar::ACTIVE_COLOR,
        )
    }
}

/// Data embedded for scripts.
#[derive(Serialize)]
struct EmbeddedData<'a> {
    summary: &'a SummarySection,
    explorer: &'a ExplorerSection,
}

fn check_state_matches(input: &ReportInput, state: &ViewState) -> Result<()> {
    if state.len() != input.test_count() {
        return Err(ReportError::StateMismatch(format!(
            "view holds {} tests, input has {}",
            state.len(),
            input.test_count()
        )));
    }
    // Indexes follow ascending test id, so a matching view lines up pairwise.
    for (i, id) in input.test_ids().enumerate() {
        let entry = state.entry(TestIndex(i))?;
        if entry.test_id() != id {
            return Err(ReportError::StateMismatch(format!(
                "test {id} has no entry at index {i}, found {}",
                entry.test_id()
            )));
        }
    }
    Ok(())
}

/// Stable `data-frame` key of an inline frame slot.
fn frame_key(slot: FrameSlot) -> String {
    match slot {
        FrameSlot::Golden => "golden".to_string(),
        FrameSlot::Stdout { task } => format!("stdout-{task}"),
        FrameSlot::Diff { task } => format!("diff-{task}"),
    }
}

/// Lowercase variant name as serde writes it.
fn serde_plain_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn write_attributes(attrs: &Attributes) -> String {
    attrs
        .iter()
        .map(|(name, value)| match value {
            Some(v) => format!(r#" {}="{}""#, name, html_escape(v)),
            None => format!(" {name}"),
        })
        .collect()
}
