//! Static HTML report generator for Score View test runs.
//!
//! Renders a self-contained HTML page from a test run's report input and
//! the current state of its view.
//!
//! # Features
//!
//! - **Single-file output**: styles, favicon and data are inline
//! - **State-faithful**: entries render only if materialized, the detail
//!   panel and inline frame appear only when open
//! - **Attribute surface**: entries and peek icons carry the stable
//!   `te-*` and `data-*` attributes for styling and scripts
//!
//! # Sections
//!
//! - Status bar: overall status, completion time and elapsed time
//! - Breadcrumbs: the directory the tests ran in
//! - Stats: test and attempt counters, optional additional info
//! - Explorer: search controls, entry list and peek strip
//! - Details: metadata, aggregate and per-attempt tables
//!
//! # Example
//!
//! ```no_run
//! use sv_report::{ReportConfig, ReportGenerator};
//! use std::path::Path;
//!
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let html = generator.generate_from_path(Path::new("report.json")).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod favicon;
pub mod generator;
pub mod sections;

pub use config::{ReportConfig, ReportLayout, ReportTheme};
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator};
