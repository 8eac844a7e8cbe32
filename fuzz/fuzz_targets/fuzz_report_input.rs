//! Fuzz target for report input parsing.
//!
//! Arbitrary bytes must either fail to parse, fail validation, or render
//! into a report; never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use sv_common::ReportInput;
use sv_report::ReportGenerator;
use sv_view::{ViewConfig, ViewState};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = serde_json::from_slice::<ReportInput>(data) else {
        return;
    };
    if input.validate().is_err() {
        return;
    }
    let input = Arc::new(input);
    if let Ok(state) = ViewState::new(Arc::clone(&input), ViewConfig::default()) {
        let _ = ReportGenerator::default_config().generate(&input, &state);
    }
});
