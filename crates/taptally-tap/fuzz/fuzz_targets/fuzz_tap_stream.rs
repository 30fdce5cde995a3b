// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for whole-stream TAP parsing
//!
//! This fuzzes `TapParser::parse` with arbitrary bytes, including invalid
//! UTF-8 and overlong lines.

#![no_main]

use libfuzzer_sys::fuzz_target;

use taptally_tap::TapParser;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = TapParser::new() else {
        return;
    };

    let mut echo = Vec::new();
    if let Ok(summary) = parser.parse(data, &mut echo) {
        // Each echoed line gains at most its newline
        assert!(echo.len() <= data.len() + 1);
        if summary.parse_error.is_none() && !summary.bail_out {
            assert!(summary.plan_matches());
        }
    }
});
