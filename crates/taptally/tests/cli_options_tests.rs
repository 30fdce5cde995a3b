// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for input, format, echo and parser limit options

use clap::Parser;
use similar_asserts::assert_eq;
use taptally::config::{Config, ReportFormat};
use taptally::report::{Report, write_report};
use taptally_tap::{Outcome, TapParser};

#[test]
fn test_format_defaults_to_text() {
    let config = Config::try_parse_from(["taptally"]).expect("parse should succeed");
    assert_eq!(config.format, ReportFormat::Text);
}

#[test]
fn test_format_json() {
    let config =
        Config::try_parse_from(["taptally", "--format", "json"]).expect("parse should succeed");
    assert_eq!(config.format, ReportFormat::Json);

    let config = Config::try_parse_from(["taptally", "-f", "text"]).expect("parse should succeed");
    assert_eq!(config.format, ReportFormat::Text);
}

#[test]
fn test_unknown_format_rejected() {
    let result = Config::try_parse_from(["taptally", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_no_echo_flag() {
    let config = Config::try_parse_from(["taptally", "--no-echo"]).expect("parse should succeed");
    assert!(config.no_echo);
}

#[test]
fn test_max_line_length() {
    let config = Config::try_parse_from(["taptally", "--max-line-length", "4096"])
        .expect("parse should succeed");
    assert_eq!(config.max_line_length, Some(4096));
    assert_eq!(config.parse_options().max_line_length, 4096);
}

#[test]
fn test_max_line_length_must_be_numeric() {
    let result = Config::try_parse_from(["taptally", "--max-line-length", "lots"]);
    assert!(result.is_err());
}

#[test]
fn test_configured_limit_reaches_parser() {
    let config = Config::try_parse_from(["taptally", "--max-line-length", "8"])
        .expect("parse should succeed");
    let parser = TapParser::with_options(config.parse_options()).expect("compile");
    let summary = parser
        .parse("1..1\nok 1 - long enough\n".as_bytes(), std::io::sink())
        .expect("Should parse");

    let report = Report::new(summary);
    assert_eq!(report.verdict.outcome, Outcome::Broken);

    let mut out = Vec::new();
    write_report(&report, config.format, &mut out).expect("Should write");
    let text = String::from_utf8(out).expect("UTF-8");
    assert!(text.contains("error: Output line too long"));
}
