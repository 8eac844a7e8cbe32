//! Report section data structures.

pub mod explorer;
pub mod summary;

pub use explorer::{Attributes, EntryRow, ExplorerSection, PeekRow};
pub use summary::SummarySection;
