//! Search filter: text query plus status checkboxes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Regular expression searched (unanchored) in each test ID.
    pub query: String,
    pub show_success: bool,
    pub show_error: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            show_success: true,
            show_error: true,
        }
    }
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, show_success: bool, show_error: bool) -> Self {
        Self {
            query: query.into(),
            show_success,
            show_error,
        }
    }
}

/// Criteria with the query compiled; only valid patterns get this far.
///
/// Queries use the `regex` crate's syntax, which has no lookaround or
/// backreferences. Patterns such as `(?<=/)net` are rejected as invalid
/// even though a browser `RegExp` would accept them.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    criteria: FilterCriteria,
    pattern: Regex,
}

impl CompiledFilter {
    pub fn compile(criteria: FilterCriteria) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&criteria.query)?;
        Ok(Self { criteria, pattern })
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn matches(&self, test_id: &str, ok: bool) -> bool {
        let status_shown = if ok {
            self.criteria.show_success
        } else {
            self.criteria.show_error
        };
        status_shown && self.pattern.is_match(test_id)
    }
}

/// Counts of visible tests after a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterStats {
    pub successes: usize,
    pub errors: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl FilterStats {
    pub fn total(&self) -> usize {
        self.successes + self.errors
    }

    /// One-line summary for the search status line.
    pub fn status_message(&self) -> String {
        format!(
            "Query processed, found {} (passed: {}, errors: {}) in {} ms",
            self.total(),
            self.successes,
            self.errors,
            self.elapsed.as_millis()
        )
    }
}

/// Result of `ViewState::set_filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Applied(FilterStats),
    /// The pattern did not compile; the previous filter stays in effect.
    Rejected { error: String },
}

impl FilterOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FilterOutcome::Applied(_))
    }

    pub fn stats(&self) -> Option<&FilterStats> {
        match self {
            FilterOutcome::Applied(stats) => Some(stats),
            FilterOutcome::Rejected { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanchored_match_and_status() {
        let filter = CompiledFilter::compile(FilterCriteria::new("fail", false, true)).unwrap();
        assert!(filter.matches("alpha/fail_one", false));
        assert!(!filter.matches("alpha/fail_one", true));
        assert!(!filter.matches("alpha/pass_one", false));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = CompiledFilter::compile(FilterCriteria::default()).unwrap();
        assert!(filter.matches("", true));
        assert!(filter.matches("anything", false));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(CompiledFilter::compile(FilterCriteria::new("(unterminated", true, true)).is_err());
    }

    #[test]
    fn test_lookaround_and_backreferences_rejected() {
        for query in ["(?<=/)net", "io(?!/)", r"(a)\1"] {
            assert!(
                CompiledFilter::compile(FilterCriteria::new(query, true, true)).is_err(),
                "{query} should not compile"
            );
        }
    }

    #[test]
    fn test_status_message() {
        let stats = FilterStats {
            successes: 3,
            errors: 2,
            elapsed: Duration::from_millis(4),
        };
        assert_eq!(
            stats.status_message(),
            "Query processed, found 5 (passed: 3, errors: 2) in 4 ms"
        );
    }
}
