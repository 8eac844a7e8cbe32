//! Report input document.
//!
//! The input is produced once by the test runner and is read-only for the
//! whole report session. It is keyed by test ID; every test refers to its
//! attempts ("tasks") by position in the flat `taskResults` list.
//!
//! Compact tuple encodings of the runner's log are kept on the wire, e.g.
//! `"timesMs": [cpu, wallStart, wallEnd]` and `"exit": [ok, kind, repr]`,
//! and are exposed as named structs here.

use crate::error::{Error, InputError, Result};
use crate::id::TestStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A `(mean, stddev)` statistic over a test's attempts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Stat {
    pub mean: f64,
    /// Zero when the test ran only once.
    pub stddev: f64,
}

impl From<(f64, f64)> for Stat {
    fn from((mean, stddev): (f64, f64)) -> Self {
        Stat { mean, stddev }
    }
}

impl From<Stat> for (f64, f64) {
    fn from(stat: Stat) -> Self {
        (stat.mean, stat.stddev)
    }
}

/// Expected exit of a test: the exit kind and its representation.
///
/// The representation is the exit code for `return`, the timeout value
/// for `timeout`, the signal number for `signal`, and absent otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Option<i64>)", into = "(String, Option<i64>)")]
pub struct ExpectedExit {
    pub kind: String,
    pub repr: Option<i64>,
}

impl From<(String, Option<i64>)> for ExpectedExit {
    fn from((kind, repr): (String, Option<i64>)) -> Self {
        ExpectedExit { kind, repr }
    }
}

impl From<ExpectedExit> for (String, Option<i64>) {
    fn from(exit: ExpectedExit) -> Self {
        (exit.kind, exit.repr)
    }
}

impl std::fmt::Display for ExpectedExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repr {
            Some(repr) => write!(f, "{} {}", self.kind, repr),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Actual exit of one task attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(bool, String, Option<i64>)",
    into = "(bool, String, Option<i64>)"
)]
pub struct TaskExit {
    /// Exit kind and representation both matched the expectation.
    pub ok: bool,
    pub kind: String,
    pub repr: Option<i64>,
}

impl From<(bool, String, Option<i64>)> for TaskExit {
    fn from((ok, kind, repr): (bool, String, Option<i64>)) -> Self {
        TaskExit { ok, kind, repr }
    }
}

impl From<TaskExit> for (bool, String, Option<i64>) {
    fn from(exit: TaskExit) -> Self {
        (exit.ok, exit.kind, exit.repr)
    }
}

impl TaskExit {
    /// `kind repr`, e.g. `return 0` or `quit`.
    pub fn describe(&self) -> String {
        match self.repr {
            Some(repr) => format!("{} {}", self.kind, repr),
            None => self.kind.clone(),
        }
    }
}

/// Timing of one task attempt, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct TaskTimes {
    /// Time on processor (not wall time).
    pub cpu: f64,
    /// Wall-clock start, Unix epoch.
    pub wall_start: f64,
    /// Wall-clock end, Unix epoch.
    pub wall_end: f64,
}

impl From<(f64, f64, f64)> for TaskTimes {
    fn from((cpu, wall_start, wall_end): (f64, f64, f64)) -> Self {
        TaskTimes {
            cpu,
            wall_start,
            wall_end,
        }
    }
}

impl From<TaskTimes> for (f64, f64, f64) {
    fn from(t: TaskTimes) -> Self {
        (t.cpu, t.wall_start, t.wall_end)
    }
}

impl TaskTimes {
    /// Wall-clock duration.
    pub fn wall(&self) -> f64 {
        (self.wall_end - self.wall_start).max(0.0)
    }

    /// Processor time as a whole percentage of wall time, if defined.
    pub fn cpu_wall_percent(&self) -> Option<f64> {
        let wall = self.wall();
        if wall > 0.0 {
            Some((self.cpu / wall * 100.0).round())
        } else {
            None
        }
    }
}

/// Stdout outcome of one task attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(Option<bool>, Option<String>, Option<String>)",
    into = "(Option<bool>, Option<String>, Option<String>)"
)]
pub struct TaskStdout {
    /// Whether stdout matched the golden file; absent when stdout was
    /// written as the new golden file.
    pub ok: Option<bool>,
    /// Link to the captured stdout.
    pub stdout_link: Option<String>,
    /// Link to the diff against the golden file, when one was found.
    pub diff_link: Option<String>,
}

impl From<(Option<bool>, Option<String>, Option<String>)> for TaskStdout {
    fn from((ok, stdout_link, diff_link): (Option<bool>, Option<String>, Option<String>)) -> Self {
        TaskStdout {
            ok,
            stdout_link,
            diff_link,
        }
    }
}

impl From<TaskStdout> for (Option<bool>, Option<String>, Option<String>) {
    fn from(s: TaskStdout) -> Self {
        (s.ok, s.stdout_link, s.diff_link)
    }
}

/// Result of one task attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub ok: bool,
    pub times_ms: TaskTimes,
    pub maxrss_kb: f64,
    pub exit: TaskExit,
    pub stdout: TaskStdout,
}

/// Aggregate result of one test over all of its attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub ok: bool,
    /// Positions of this test's attempts in `ReportInput::task_results`.
    pub task_indexes: Vec<usize>,
    pub task_error_count: usize,
    /// Processor runtime in milliseconds.
    pub runtime_stat: Stat,
    /// Max resident set size in kilobytes.
    pub maxrss_stat: Stat,
    /// Shell-style invocation of the test command.
    #[serde(default)]
    pub command: String,
    /// Allowed processor time in milliseconds; zero means unlimited.
    #[serde(default)]
    pub timeout: f64,
    pub exit: ExpectedExit,
    /// Expected stdout, if the test compares it.
    #[serde(default)]
    pub golden_file: Option<String>,
}

impl TestRecord {
    /// Number of attempts.
    pub fn task_count(&self) -> usize {
        self.task_indexes.len()
    }

    /// Number of successful attempts.
    pub fn task_success_count(&self) -> usize {
        self.task_count().saturating_sub(self.task_error_count)
    }

    pub fn status(&self) -> TestStatus {
        TestStatus::from_ok(self.ok)
    }

    /// A failed test whose attempts include at least one success.
    pub fn is_flaky(&self) -> bool {
        !self.ok && self.task_error_count < self.task_count()
    }
}

fn default_schema_version() -> String {
    crate::INPUT_SCHEMA_VERSION.to_string()
}

/// The whole report input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub test_title: String,
    /// Link to the runner's master log.
    pub master_log: String,
    /// Working directory the tests ran in.
    pub test_exec_path: String,
    #[serde(default)]
    pub test_exec_path_components: Vec<String>,
    /// Earliest task start, Unix epoch milliseconds.
    pub start_time: f64,
    /// Latest task end, Unix epoch milliseconds.
    pub end_time: f64,
    /// `end_time - start_time`.
    pub whole_time: f64,
    /// Human-friendly completion time of the run.
    #[serde(default)]
    pub master_log_modification_time: String,
    pub task_error_count: usize,
    pub test_error_count: usize,
    /// Extra lines to show; `None` hides the info area entirely.
    #[serde(default)]
    pub additional_info: Option<Vec<String>>,
    pub task_results: Vec<TaskRecord>,
    /// Tests keyed by test ID, iterated in ascending ID order.
    pub test_data: BTreeMap<String, TestRecord>,
}

impl ReportInput {
    /// Parse an input document from JSON without validating it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse, and validate an input document from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let input = Self::from_json(&json)?;
        input.validate()?;
        debug!(
            path = %path.display(),
            tests = input.test_count(),
            tasks = input.task_results.len(),
            "Loaded report input"
        );
        Ok(input)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the document's internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != crate::INPUT_SCHEMA_VERSION {
            return Err(Error::SchemaVersion {
                expected: crate::INPUT_SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }
        if !(self.whole_time >= 0.0) || self.end_time < self.start_time {
            return Err(InputError::InvalidTiming(format!(
                "start={} end={} whole={}",
                self.start_time, self.end_time, self.whole_time
            ))
            .into());
        }

        let available = self.task_results.len();
        let mut counted_errors = 0;
        for (test_id, record) in &self.test_data {
            if record.task_indexes.is_empty() {
                return Err(InputError::NoTasks {
                    test_id: test_id.clone(),
                }
                .into());
            }
            if let Some(&position) = record.task_indexes.iter().find(|&&p| p >= available) {
                return Err(InputError::TaskIndexOutOfRange {
                    test_id: test_id.clone(),
                    position,
                    available,
                }
                .into());
            }
            if record.task_error_count > record.task_count() {
                return Err(InputError::ErrorCountExceedsTasks {
                    test_id: test_id.clone(),
                    errors: record.task_error_count,
                    tasks: record.task_count(),
                }
                .into());
            }
            if record.ok != (record.task_error_count == 0) {
                return Err(InputError::StatusMismatch {
                    test_id: test_id.clone(),
                    ok: record.ok,
                    errors: record.task_error_count,
                }
                .into());
            }
            if !record.ok {
                counted_errors += 1;
            }
        }
        if counted_errors != self.test_error_count {
            return Err(InputError::TestErrorCountMismatch {
                declared: self.test_error_count,
                counted: counted_errors,
            }
            .into());
        }
        Ok(())
    }

    /// Number of tests.
    pub fn test_count(&self) -> usize {
        self.test_data.len()
    }

    /// Number of tests whose attempts all succeeded.
    pub fn success_count(&self) -> usize {
        self.test_count().saturating_sub(self.test_error_count)
    }

    /// Whether every test succeeded.
    pub fn all_ok(&self) -> bool {
        self.test_error_count == 0
    }

    /// Test IDs in ascending order.
    pub fn test_ids(&self) -> impl Iterator<Item = &str> {
        self.test_data.keys().map(String::as_str)
    }

    /// Look up a test by ID.
    pub fn test(&self, test_id: &str) -> Option<&TestRecord> {
        self.test_data.get(test_id)
    }

    /// The attempts of `record`, in order. Out-of-range positions are
    /// skipped; [`ReportInput::validate`] reports them.
    pub fn tasks_of<'a>(&'a self, record: &'a TestRecord) -> impl Iterator<Item = &'a TaskRecord> {
        record
            .task_indexes
            .iter()
            .filter_map(move |&p| self.task_results.get(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "testTitle": "Unit",
        "masterLog": "log.json",
        "testExecPath": "/home/u/proj",
        "testExecPathComponents": ["/", "home", "u", "proj"],
        "startTime": 1000.0,
        "endTime": 3000.0,
        "wholeTime": 2000.0,
        "masterLogModificationTime": "Mon, Jan 01, 2024 10:00:00",
        "taskErrorCount": 1,
        "testErrorCount": 1,
        "taskResults": [
            {"ok": true, "timesMs": [10.0, 1000.0, 1100.0], "maxrssKb": 2048.0,
             "exit": [true, "return", 0], "stdout": [true, "out/a.1.stdout", null]},
            {"ok": false, "timesMs": [20.0, 1200.0, 3000.0], "maxrssKb": 4096.0,
             "exit": [false, "signal", 11], "stdout": [null, null, null]}
        ],
        "testData": {
            "a": {"ok": true, "taskIndexes": [0], "taskErrorCount": 0,
                  "runtimeStat": [10.0, 0.0], "maxrssStat": [2048.0, 0.0],
                  "command": "./a", "timeout": 500, "exit": ["return", 0],
                  "goldenFile": "a.golden"},
            "b": {"ok": false, "taskIndexes": [1], "taskErrorCount": 1,
                  "runtimeStat": [20.0, 0.0], "maxrssStat": [4096.0, 0.0],
                  "exit": ["return", 0]}
        }
    }"#;

    #[test]
    fn test_parse_tuple_encodings() {
        let input = ReportInput::from_json(SAMPLE).unwrap();
        input.validate().unwrap();
        assert_eq!(input.schema_version, "1.0.0");
        assert_eq!(input.additional_info, None);

        let task = &input.task_results[1];
        assert_eq!(task.times_ms.wall(), 1800.0);
        assert_eq!(task.exit.describe(), "signal 11");
        assert_eq!(task.stdout.ok, None);

        let a = input.test("a").unwrap();
        assert_eq!(a.runtime_stat.mean, 10.0);
        assert_eq!(a.exit.to_string(), "return 0");
        assert_eq!(a.golden_file.as_deref(), Some("a.golden"));
    }

    #[test]
    fn test_ids_are_sorted() {
        let input = ReportInput::from_json(SAMPLE).unwrap();
        let ids: Vec<&str> = input.test_ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_counts() {
        let input = ReportInput::from_json(SAMPLE).unwrap();
        assert_eq!(input.test_count(), 2);
        assert_eq!(input.success_count(), 1);
        assert!(!input.all_ok());
        let b = input.test("b").unwrap();
        assert_eq!(input.tasks_of(b).count(), 1);
        assert!(!b.is_flaky());
    }

    #[test]
    fn test_flaky_detection() {
        let mut input = ReportInput::from_json(SAMPLE).unwrap();
        let b = input.test_data.get_mut("b").unwrap();
        b.task_indexes = vec![0, 1];
        assert!(b.is_flaky());
        assert_eq!(b.task_success_count(), 1);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_task() {
        let mut input = ReportInput::from_json(SAMPLE).unwrap();
        input.test_data.get_mut("a").unwrap().task_indexes = vec![7];
        let err = input.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Input(InputError::TaskIndexOutOfRange { position: 7, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_status_mismatch() {
        let mut input = ReportInput::from_json(SAMPLE).unwrap();
        input.test_data.get_mut("a").unwrap().ok = false;
        assert!(matches!(
            input.validate().unwrap_err(),
            Error::Input(InputError::StatusMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_error_count_mismatch() {
        let mut input = ReportInput::from_json(SAMPLE).unwrap();
        input.test_error_count = 2;
        assert!(matches!(
            input.validate().unwrap_err(),
            Error::Input(InputError::TestErrorCountMismatch {
                declared: 2,
                counted: 1
            })
        ));
    }

    #[test]
    fn test_validate_rejects_schema_version() {
        let mut input = ReportInput::from_json(SAMPLE).unwrap();
        input.schema_version = "9.0.0".to_string();
        assert_eq!(input.validate().unwrap_err().code(), 11);
    }

    #[test]
    fn test_json_roundtrip_keeps_tuple_shape() {
        let input = ReportInput::from_json(SAMPLE).unwrap();
        let json = input.to_json().unwrap();
        assert!(json.contains(r#""timesMs":[10.0,1000.0,1100.0]"#));
        let parsed = ReportInput::from_json(&json).unwrap();
        assert_eq!(parsed, input);
    }

    #[test]
    fn test_cpu_wall_percent() {
        let times = TaskTimes::from((50.0, 0.0, 200.0));
        assert_eq!(times.cpu_wall_percent(), Some(25.0));
        let instant = TaskTimes::from((0.0, 5.0, 5.0));
        assert_eq!(instant.cpu_wall_percent(), None);
    }
}
