//! View-state layer of the Score View test report.
//!
//! The report shows every test twice: as an entry in the scrollable
//! explorer list and as a compact item in the peek strip. [`ViewState`]
//! keeps both in sync, applies the search filter, tracks the single
//! selection and lazily materializes entry content as entries scroll into
//! view. Everything here is plain typed state; attribute names and HTML
//! belong to the report generator.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sv_common::{ReportInput, TestIndex};
//! use sv_view::{ViewConfig, ViewState};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = ReportInput::from_path("report.json".as_ref())?;
//! let mut state = ViewState::new(Arc::new(input), ViewConfig::default())?;
//! state.set_filter("net", true, true);
//! state.select(TestIndex(0))?;
//! # Ok(())
//! # }
//! ```

pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod events;
pub mod filter;
pub mod frame;
pub mod item;
pub mod prefs;
pub mod sort;
pub mod state;

pub use clipboard::{Clipboard, ClipboardError, CopyAction, CopyOutcome, CopyTarget};
pub use config::ViewConfig;
pub use debounce::Debouncer;
pub use detail::{Cell, CellClass, DetailPanel, LabelledRow, TaskRow, TimelineBar};
pub use error::{Result, ViewError};
pub use events::{ClickTarget, Container, Effect, IntersectionChange, UiEvent};
pub use filter::{CompiledFilter, FilterCriteria, FilterOutcome, FilterStats};
pub use frame::{FrameOpener, FrameSlot, FrameTransition, InlineFrameViewer};
pub use item::{
    EntryContent, EntryItem, PeekGlyph, PeekItem, PeekView, StarGlyph, StatusGlyph, Tooltip,
};
pub use prefs::{ColorMode, JsonFileStore, MemoryStore, PreferenceStore};
pub use sort::SortKey;
pub use state::ViewState;
