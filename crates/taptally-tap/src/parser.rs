// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TAP stream driver
//!
//! This module reads TAP output line by line, echoes every consumed line
//! to an output sink and tallies the results into a [`Summary`].
//!
//! # Example
//!
//! ```
//! use taptally_tap::parser::TapParser;
//!
//! let parser = TapParser::new().unwrap();
//! let input = "1..2\nok 1 - first\nnot ok 2 - second # TODO later\n";
//! let mut echo = Vec::new();
//! let summary = parser.parse(input.as_bytes(), &mut echo).unwrap();
//!
//! assert_eq!(summary.ok_count, 2);
//! assert!(summary.parse_error.is_none());
//! assert_eq!(echo, input.as_bytes());
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::classify::{Classification, ClassifierChain};
use crate::error::{ProtocolError, TapError};
use crate::options::ParseOptions;
use crate::plan::PlanRecognizer;
use crate::summary::Summary;

/// Prefix of a line aborting the test program
pub const BAIL_OUT_PREFIX: &str = "Bail out!";

/// State of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    /// Accepting lines
    Scanning,
    /// A `Bail out!` line was seen
    BailedOut,
    /// A protocol error was recorded
    Errored,
    /// The output ended
    Done,
}

/// What a single line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// A plan line, committed or rejected
    Plan,
    /// A `Bail out!` line
    BailOut,
    /// A classified result line
    Result(Classification),
    /// A line no grammar applies to, such as a diagnostic
    Ignored,
    /// The line was not examined because the scan had stopped
    Stopped,
}

/// Compiled TAP grammars and parse limits
///
/// A parser can be reused for any number of streams, and shared between
/// threads; each parse owns its own [`Summary`].
#[derive(Debug)]
pub struct TapParser {
    plan: PlanRecognizer,
    classifiers: ClassifierChain,
    options: ParseOptions,
}

impl TapParser {
    /// Create a parser with default limits
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` if a grammar fails to compile.
    pub fn new() -> Result<Self, TapError> {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom limits
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` if a grammar fails to compile.
    pub fn with_options(options: ParseOptions) -> Result<Self, TapError> {
        Ok(Self {
            plan: PlanRecognizer::new(options)?,
            classifiers: ClassifierChain::standard()?,
            options,
        })
    }

    /// Limits in effect
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Start an incremental parse
    #[must_use]
    pub fn streaming(&self) -> StreamingParser<'_> {
        StreamingParser {
            parser: self,
            summary: Summary::new(),
            state: ScanState::Scanning,
        }
    }

    /// Parse a complete TAP stream
    ///
    /// Every consumed line is written to `output` followed by a newline.
    /// Reading stops at end of stream, at the first empty line, after a
    /// `Bail out!` line or after the first protocol error. `input` is
    /// dropped before returning, on every path.
    ///
    /// Lines of `max_line_length` bytes or more are reported as
    /// [`ProtocolError::LineTooLong`]; only their first
    /// `max_line_length + 1` bytes are read and echoed.
    ///
    /// # Errors
    ///
    /// Returns `TapError::Io` if reading the input or writing the echo
    /// fails. Protocol violations are not errors; they are reported in
    /// [`Summary::parse_error`].
    pub fn parse<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<Summary, TapError> {
        let mut reader = BufReader::new(input);
        let mut stream = self.streaming();
        let limit = u64::try_from(self.options.max_line_length)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let mut raw = Vec::new();

        while stream.is_accepting() {
            raw.clear();
            if (&mut reader).take(limit).read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            if raw.last() == Some(&b'\n') {
                raw.pop();
            }
            if raw.is_empty() {
                debug!("Empty line, treating as end of output");
                break;
            }

            output.write_all(&raw)?;
            output.write_all(b"\n")?;
            stream.process_bytes(&raw);
        }

        output.flush()?;
        Ok(stream.finish())
    }

    /// Open `path` and parse its contents
    ///
    /// # Errors
    ///
    /// Returns `TapError::Io` if the file cannot be opened or read, or the
    /// echo cannot be written.
    pub fn parse_file<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        output: W,
    ) -> Result<Summary, TapError> {
        let file = File::open(path.as_ref())?;
        self.parse(file, output)
    }
}

/// Incremental TAP parse over lines supplied by the caller
///
/// Lines are passed without their trailing newline. Once a bail-out or a
/// protocol error has been recorded, further lines are not examined.
#[derive(Debug)]
pub struct StreamingParser<'p> {
    parser: &'p TapParser,
    summary: Summary,
    state: ScanState,
}

impl StreamingParser<'_> {
    /// Current state of the scan
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Whether further lines will be examined
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.state == ScanState::Scanning
    }

    /// Tally so far, without the end-of-stream checks
    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Process one line of output
    ///
    /// An empty line ends the scan.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        self.process(line.len(), line)
    }

    /// Process one raw line of output, decoding it lossily as UTF-8
    ///
    /// The length limit applies to the raw bytes.
    pub fn process_bytes(&mut self, raw: &[u8]) -> LineOutcome {
        self.process(raw.len(), &String::from_utf8_lossy(raw))
    }

    fn process(&mut self, length: usize, line: &str) -> LineOutcome {
        if !self.is_accepting() {
            return LineOutcome::Stopped;
        }

        if line.is_empty() {
            self.state = ScanState::Done;
            return LineOutcome::Stopped;
        }

        let outcome = self.examine(length, line);

        if let Some(error) = self.summary.parse_error {
            warn!(%error, line, "Malformed TAP output");
            self.state = ScanState::Errored;
        } else if self.summary.bail_out {
            self.state = ScanState::BailedOut;
        }
        outcome
    }

    fn examine(&mut self, length: usize, line: &str) -> LineOutcome {
        if length >= self.parser.options.max_line_length {
            self.summary.record_error(ProtocolError::LineTooLong);
            return LineOutcome::Ignored;
        }

        if self.parser.plan.try_parse(line, &mut self.summary) {
            return LineOutcome::Plan;
        }

        if line.starts_with(BAIL_OUT_PREFIX) {
            info!(line, "Test program bailed out");
            self.summary.bail_out = true;
            return LineOutcome::BailOut;
        }

        match self.parser.classifiers.classify(line) {
            Some((classification, grammar)) => {
                trace!(?classification, grammar, line, "Classified result line");
                match classification {
                    Classification::Pass => self.summary.ok_count += 1,
                    Classification::Fail => self.summary.not_ok_count += 1,
                }
                LineOutcome::Result(classification)
            }
            None => LineOutcome::Ignored,
        }
    }

    /// End the scan and apply the plan consistency checks
    #[must_use]
    pub fn finish(self) -> Summary {
        let mut summary = self.summary;

        if !summary.has_plan() {
            summary.record_error(ProtocolError::NoPlan);
        } else if summary.parse_error.is_none() && !summary.bail_out && !summary.plan_matches() {
            summary.record_error(ProtocolError::PlanMismatch);
        }

        debug!(
            ok = summary.ok_count,
            not_ok = summary.not_ok_count,
            bail_out = summary.bail_out,
            skipped_all = summary.skipped_all,
            parse_error = ?summary.parse_error,
            "Finished parsing TAP output"
        );
        summary
    }
}

/// Parse a TAP stream with a default parser
///
/// # Errors
///
/// See [`TapParser::parse`].
pub fn parse<R: Read, W: Write>(input: R, output: W) -> Result<Summary, TapError> {
    TapParser::new()?.parse(input, output)
}

/// Parse TAP output held in memory, discarding the echo
///
/// # Errors
///
/// See [`TapParser::parse`].
pub fn parse_str(output: &str) -> Result<Summary, TapError> {
    TapParser::new()?.parse(output.as_bytes(), io::sink())
}
