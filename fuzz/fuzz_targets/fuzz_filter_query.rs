//! Fuzz target for search queries and view events.
//!
//! Any query text, valid regex or not, and any sequence of clicks and
//! viewport changes must leave the view invariants intact.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use sv_common::test_utils::five_test_fixture;
use sv_common::TestIndex;
use sv_view::{IntersectionChange, ViewConfig, ViewState};

#[derive(Debug, Arbitrary)]
enum Step {
    Filter {
        query: String,
        show_success: bool,
        show_error: bool,
    },
    Select(u8),
    Peek(u8),
    Star(u8),
    Viewport(u8, bool),
}

fuzz_target!(|steps: Vec<Step>| {
    let Ok(mut state) = ViewState::new(Arc::new(five_test_fixture()), ViewConfig::default())
    else {
        return;
    };
    let len = state.len();
    let idx = |i: u8| TestIndex(i as usize % len);
    for step in steps {
        match step {
            Step::Filter {
                query,
                show_success,
                show_error,
            } => {
                let _ = state.set_filter(&query, show_success, show_error);
            }
            Step::Select(i) => {
                assert!(state.select(idx(i)).is_ok());
            }
            Step::Peek(i) => {
                assert!(state.select_from_peek(idx(i)).is_ok());
            }
            Step::Star(i) => {
                assert!(state.toggle_star(idx(i)).is_ok());
            }
            Step::Viewport(i, on) => {
                let change = IntersectionChange {
                    index: idx(i),
                    is_intersecting: on,
                };
                assert!(state.on_viewport_intersection(&[change]).is_ok());
            }
        }
        assert!(state.check_invariants().is_ok());
    }
});
