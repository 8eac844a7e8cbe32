//! Inline frame viewer of the detail panel.
//!
//! Several cells of the detail panel open a document (golden file, task
//! stdout, task diff) inline. At most one frame is open at a time.

use serde::Serialize;
use std::fmt;

/// Which opener a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameSlot {
    /// Expected stdout of the test.
    Golden,
    /// Captured stdout of the task at this ordinal (0-based).
    Stdout { task: usize },
    /// Diff against the golden file of the task at this ordinal.
    Diff { task: usize },
}

impl fmt::Display for FrameSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSlot::Golden => write!(f, "golden file"),
            FrameSlot::Stdout { task } => write!(f, "stdout of task {}", task + 1),
            FrameSlot::Diff { task } => write!(f, "diff of task {}", task + 1),
        }
    }
}

/// An opener cell: a slot plus the document it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameOpener {
    pub slot: FrameSlot,
    pub src: String,
}

/// What a toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameTransition {
    Opened(FrameSlot),
    /// The previously open frame was replaced.
    Switched { from: FrameSlot, to: FrameSlot },
    Closed(FrameSlot),
}

/// Holds the one open frame, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineFrameViewer {
    open: Option<FrameOpener>,
}

impl InlineFrameViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_frame(&self) -> Option<&FrameOpener> {
        self.open.as_ref()
    }

    pub fn is_open(&self, slot: FrameSlot) -> bool {
        self.open.as_ref().is_some_and(|o| o.slot == slot)
    }

    /// Activate `opener`: closes it when it is the open one, otherwise
    /// opens it in place of whatever was open.
    pub fn toggle(&mut self, opener: FrameOpener) -> FrameTransition {
        match self.open.take() {
            Some(current) if current.slot == opener.slot => FrameTransition::Closed(current.slot),
            Some(current) => {
                let transition = FrameTransition::Switched {
                    from: current.slot,
                    to: opener.slot,
                };
                self.open = Some(opener);
                transition
            }
            None => {
                let slot = opener.slot;
                self.open = Some(opener);
                FrameTransition::Opened(slot)
            }
        }
    }

    pub fn close(&mut self) -> Option<FrameSlot> {
        self.open.take().map(|o| o.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opener(slot: FrameSlot) -> FrameOpener {
        FrameOpener {
            slot,
            src: format!("{slot}"),
        }
    }

    #[test]
    fn test_second_opener_replaces_first() {
        let mut viewer = InlineFrameViewer::new();
        assert_eq!(
            viewer.toggle(opener(FrameSlot::Golden)),
            FrameTransition::Opened(FrameSlot::Golden)
        );
        let diff = FrameSlot::Diff { task: 1 };
        assert_eq!(
            viewer.toggle(opener(diff)),
            FrameTransition::Switched {
                from: FrameSlot::Golden,
                to: diff
            }
        );
        assert!(viewer.is_open(diff));
        assert!(!viewer.is_open(FrameSlot::Golden));
    }

    #[test]
    fn test_same_opener_closes() {
        let mut viewer = InlineFrameViewer::new();
        let slot = FrameSlot::Stdout { task: 0 };
        viewer.toggle(opener(slot));
        assert_eq!(viewer.toggle(opener(slot)), FrameTransition::Closed(slot));
        assert!(viewer.open_frame().is_none());
        assert_eq!(viewer.close(), None);
    }

    #[test]
    fn test_slot_display_is_one_based() {
        assert_eq!(FrameSlot::Diff { task: 0 }.to_string(), "diff of task 1");
    }
}
