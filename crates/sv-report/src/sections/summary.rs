//! Run summary data: status bar, counters, breadcrumbs and extra info.

use serde::Serialize;
use sv_common::format::elapsed_string;
use sv_common::ReportInput;

/// Whole-run summary shown above the explorer.
#[derive(Debug, Clone, Serialize)]
pub struct SummarySection {
    pub title: String,
    pub all_ok: bool,
    pub test_count: usize,
    pub success_count: usize,
    pub test_error_count: usize,
    pub task_count: usize,
    pub task_error_count: usize,
    /// Wall-clock span of the run in milliseconds.
    pub whole_time_ms: f64,
    /// Human-friendly completion time.
    pub completed_at: String,
    pub master_log: String,
    pub exec_path: String,
    pub exec_path_components: Vec<String>,
    /// `None` hides the info area; an empty list shows it empty.
    pub additional_info: Option<Vec<String>>,
}

impl SummarySection {
    pub fn from_input(input: &ReportInput, title: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or(&input.test_title).to_string(),
            all_ok: input.all_ok(),
            test_count: input.test_count(),
            success_count: input.success_count(),
            test_error_count: input.test_error_count,
            task_count: input.task_results.len(),
            task_error_count: input.task_error_count,
            whole_time_ms: input.whole_time,
            completed_at: input.master_log_modification_time.clone(),
            master_log: input.master_log.clone(),
            exec_path: input.test_exec_path.clone(),
            exec_path_components: input.test_exec_path_components.clone(),
            additional_info: input.additional_info.clone(),
        }
    }

    /// Main status bar message.
    pub fn status_label(&self) -> &'static str {
        if self.all_ok {
            "Success"
        } else {
            "Error"
        }
    }

    /// Material icon of the status bar.
    pub fn status_icon(&self) -> &'static str {
        if self.all_ok {
            "check_circle"
        } else {
            "error"
        }
    }

    pub fn status_class(&self) -> &'static str {
        if self.all_ok {
            "status_bar_ok"
        } else {
            "status_bar_error"
        }
    }

    pub fn elapsed(&self) -> String {
        elapsed_string(self.whole_time_ms)
    }

    /// Breadcrumb parts; falls back to the whole path when the input has
    /// no components.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        if self.exec_path_components.is_empty() {
            vec![self.exec_path.as_str()]
        } else {
            self.exec_path_components.iter().map(String::as_str).collect()
        }
    }
}
