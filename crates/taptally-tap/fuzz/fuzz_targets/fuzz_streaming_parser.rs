// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for streaming parser
//!
//! This fuzzes the `StreamingParser` which processes TAP output
//! line-by-line incrementally, under arbitrary parser limits.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use taptally_tap::{ParseOptions, TapParser};

#[derive(Arbitrary, Debug)]
struct StreamInput {
    max_line_length: u16,
    max_plan_description: u16,
    max_field_length: u8,
    lines: Vec<String>,
}

fuzz_target!(|input: StreamInput| {
    let options = ParseOptions::default()
        .with_max_line_length(usize::from(input.max_line_length))
        .with_max_plan_description(usize::from(input.max_plan_description))
        .with_max_field_length(usize::from(input.max_field_length));
    let Ok(parser) = TapParser::with_options(options) else {
        return;
    };
    let mut stream = parser.streaming();

    // Process each line - parser should never panic
    for line in &input.lines {
        let _ = stream.process_line(line);
    }

    // Finalize should never panic
    let summary = stream.finish();
    if summary.parse_error.is_none() && !summary.bail_out {
        assert!(summary.plan_matches());
    }
});
