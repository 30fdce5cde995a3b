// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running the parser and reporting its result
//!
//! # Example
//!
//! ```
//! use taptally::config::ReportFormat;
//! use taptally::report::{Report, write_report};
//! use taptally_tap::TapParser;
//!
//! let parser = TapParser::new().unwrap();
//! let summary = parser.parse("1..1\nok 1\n".as_bytes(), std::io::sink()).unwrap();
//! let report = Report::new(summary);
//!
//! let mut out = Vec::new();
//! write_report(&report, ReportFormat::Text, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("taptally: passed"));
//! ```

use std::io::{self, Write};

use anyhow::Context;
use serde::Serialize;
use taptally_tap::{Outcome, Summary, TapParser, Verdict};
use tracing::{debug, info};

use crate::config::{Config, ReportFormat};

/// Summary of a parse together with its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Tally of the TAP output
    pub summary: Summary,
    /// Outcome derived from the tally
    pub verdict: Verdict,
}

impl Report {
    /// Derive the verdict of `summary`
    #[must_use]
    pub fn new(summary: Summary) -> Self {
        let verdict = Verdict::from_summary(&summary);
        Self { summary, verdict }
    }
}

/// Write `report` in the requested format
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_report<W: Write>(report: &Report, format: ReportFormat, mut out: W) -> io::Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        ReportFormat::Text => write_text(report, &mut out)?,
    }
    out.flush()
}

fn write_text<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let summary = &report.summary;
    writeln!(out, "taptally: {}", report.verdict)?;
    if summary.has_plan() {
        writeln!(out, "  plan: {}..{}", summary.first_index, summary.last_index)?;
    }
    writeln!(
        out,
        "  results: {} ok, {} not ok",
        summary.ok_count, summary.not_ok_count
    )?;
    if summary.bail_out {
        writeln!(out, "  bailed out")?;
    }
    if let Some(error) = summary.parse_error {
        writeln!(out, "  error: {error}")?;
    }
    Ok(())
}

/// Parse the configured input, echo it, and report the result on stderr
///
/// # Errors
///
/// Returns an error if the grammars cannot be compiled, the input cannot
/// be read, or the echo or report cannot be written.
pub fn execute(config: &Config) -> anyhow::Result<Outcome> {
    let parser = TapParser::with_options(config.parse_options())
        .context("Failed to prepare TAP grammars")?;

    let echo: Box<dyn Write> = if config.no_echo {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout().lock())
    };

    let summary = match &config.input {
        Some(path) => {
            debug!(path = %path.display(), "Reading TAP output from file");
            parser
                .parse_file(path, echo)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => {
            debug!("Reading TAP output from stdin");
            parser
                .parse(io::stdin().lock(), echo)
                .context("Failed to parse standard input")?
        }
    };

    let report = Report::new(summary);
    info!(
        outcome = %report.verdict.outcome,
        ok = report.summary.ok_count,
        not_ok = report.summary.not_ok_count,
        "Parsed TAP output"
    );

    write_report(&report, config.format, io::stderr().lock())
        .context("Failed to write report")?;
    Ok(report.verdict.outcome)
}
