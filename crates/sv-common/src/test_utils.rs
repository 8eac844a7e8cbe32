//! Test utilities for Score View crates.
//!
//! Provides a builder for consistent [`ReportInput`] fixtures and a few
//! assertion macros shared by the unit and integration tests.

use crate::input::{
    ExpectedExit, ReportInput, Stat, TaskExit, TaskRecord, TaskStdout, TaskTimes, TestRecord,
};
use std::collections::BTreeMap;

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that two floating point numbers are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        $crate::assert_approx_eq!($a, $b, 1e-6_f64)
    };
    ($a:expr, $b:expr, $epsilon:expr) => {{
        let a: f64 = $a;
        let b: f64 = $b;
        let eps: f64 = $epsilon;
        assert!((a - b).abs() <= eps, "{} is not within {} of {}", a, eps, b);
    }};
}

/// Fixture description of one test.
#[derive(Debug, Clone)]
struct FixtureTest {
    id: String,
    attempts: Vec<bool>,
    runtime_ms: f64,
    maxrss_kb: f64,
}

/// Builds a consistent, validated [`ReportInput`].
///
/// Attempts run back to back starting at `start_time`, each taking
/// `attempt_wall_ms` of wall time.
#[derive(Debug, Clone)]
pub struct InputBuilder {
    title: String,
    start_time: f64,
    attempt_wall_ms: f64,
    additional_info: Option<Vec<String>>,
    tests: Vec<FixtureTest>,
}

impl Default for InputBuilder {
    fn default() -> Self {
        Self {
            title: "Tests".to_string(),
            start_time: 1_600_000_000_000.0,
            attempt_wall_ms: 100.0,
            additional_info: None,
            tests: Vec::new(),
        }
    }
}

impl InputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn additional_info(mut self, lines: Vec<String>) -> Self {
        self.additional_info = Some(lines);
        self
    }

    /// Add a test that ran once.
    pub fn test(self, id: &str, ok: bool) -> Self {
        self.test_with_attempts(id, &[ok])
    }

    /// Add a test with one entry per attempt outcome.
    pub fn test_with_attempts(self, id: &str, attempts: &[bool]) -> Self {
        self.test_with_metrics(id, attempts, 10.0, 1024.0)
    }

    /// Add a test with explicit mean runtime (ms) and max rss (KB).
    pub fn test_with_metrics(
        mut self,
        id: &str,
        attempts: &[bool],
        runtime_ms: f64,
        maxrss_kb: f64,
    ) -> Self {
        self.tests.push(FixtureTest {
            id: id.to_string(),
            attempts: attempts.to_vec(),
            runtime_ms,
            maxrss_kb,
        });
        self
    }

    pub fn build(mut self) -> ReportInput {
        self.tests.sort_by(|a, b| a.id.cmp(&b.id));

        let mut task_results = Vec::new();
        let mut test_data = BTreeMap::new();
        let mut clock = self.start_time;
        let mut task_error_count = 0;
        let mut test_error_count = 0;

        for test in &self.tests {
            let mut indexes = Vec::new();
            let mut errors = 0;
            for (n, &ok) in test.attempts.iter().enumerate() {
                indexes.push(task_results.len());
                if !ok {
                    errors += 1;
                }
                let stdout_link = format!("stdout/{}.{}.stdout", test.id, n + 1);
                task_results.push(TaskRecord {
                    ok,
                    times_ms: TaskTimes {
                        cpu: test.runtime_ms,
                        wall_start: clock,
                        wall_end: clock + self.attempt_wall_ms,
                    },
                    maxrss_kb: test.maxrss_kb,
                    exit: TaskExit {
                        ok,
                        kind: "return".to_string(),
                        repr: Some(if ok { 0 } else { 1 }),
                    },
                    stdout: TaskStdout {
                        ok: Some(ok),
                        stdout_link: Some(stdout_link),
                        diff_link: if ok {
                            None
                        } else {
                            Some(format!("stdout/{}.{}.diff", test.id, n + 1))
                        },
                    },
                });
                clock += self.attempt_wall_ms;
            }
            task_error_count += errors;
            if errors > 0 {
                test_error_count += 1;
            }
            test_data.insert(
                test.id.clone(),
                TestRecord {
                    ok: errors == 0,
                    task_indexes: indexes,
                    task_error_count: errors,
                    runtime_stat: Stat {
                        mean: test.runtime_ms,
                        stddev: 0.0,
                    },
                    maxrss_stat: Stat {
                        mean: test.maxrss_kb,
                        stddev: 0.0,
                    },
                    command: format!("# cwd: /work\n  ./{}", test.id),
                    timeout: 1000.0,
                    exit: ExpectedExit {
                        kind: "return".to_string(),
                        repr: Some(0),
                    },
                    golden_file: Some(format!("golden/{}.stdout", test.id)),
                },
            );
        }

        ReportInput {
            schema_version: crate::INPUT_SCHEMA_VERSION.to_string(),
            test_title: self.title,
            master_log: "log.json".to_string(),
            test_exec_path: "/work".to_string(),
            test_exec_path_components: vec!["/".to_string(), "work".to_string()],
            start_time: self.start_time,
            end_time: clock,
            whole_time: clock - self.start_time,
            master_log_modification_time: "Tue, Sep 15, 2020 12:26:40".to_string(),
            task_error_count,
            test_error_count,
            additional_info: self.additional_info,
            task_results,
            test_data,
        }
    }
}

/// Five tests, two of which fail and contain "fail" in their ID.
pub fn five_test_fixture() -> ReportInput {
    InputBuilder::new()
        .test("alpha/pass_one", true)
        .test("alpha/fail_one", false)
        .test("beta/pass_two", true)
        .test("beta/fail_two", false)
        .test("gamma/pass_three", true)
        .build()
}
