// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Thin adapter over the `regex` engine
//!
//! A [`Pattern`] owns its compiled program; dropping it releases the
//! program, so no exit path of a match can leak it. Captures are reported
//! as byte ranges into the matched line, with unmatched optional groups
//! reported as `None` rather than an empty range.

use std::ops::Range;

use regex::Regex;

use crate::error::TapError;

/// A compiled line grammar
#[derive(Debug, Clone)]
pub struct Pattern {
    name: &'static str,
    regex: Regex,
}

/// Capture groups of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<Range<usize>>>,
}

impl Pattern {
    /// Compile `text` into a pattern identified by `name` in error reports
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` carrying the engine's native error if
    /// the pattern is rejected.
    pub fn compile(name: &'static str, text: &str) -> Result<Self, TapError> {
        let regex = Regex::new(text).map_err(|source| TapError::Pattern {
            description: format!("failed to compile {name} grammar"),
            pattern: text.to_string(),
            source,
        })?;
        Ok(Self { name, regex })
    }

    /// Name the pattern was compiled under
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source text of the pattern
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Match the pattern against a single line
    ///
    /// Returns `None` if the line does not match.
    #[must_use]
    pub fn captures(&self, line: &str) -> Option<Captures> {
        self.regex.captures(line).map(|caps| Captures {
            groups: caps.iter().map(|m| m.map(|m| m.range())).collect(),
        })
    }
}

impl Captures {
    /// Byte range of group `index`, or `None` if the group did not take part
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// Whether group `index` took part in the match
    #[must_use]
    pub fn is_present(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Text of group `index` within `line`
    #[must_use]
    pub fn text<'a>(&self, line: &'a str, index: usize) -> Option<&'a str> {
        self.get(index).and_then(|span| line.get(span))
    }
}

/// Compile `text` and match it against `line` in one step
///
/// The compiled pattern is dropped before returning, whatever the outcome.
///
/// # Errors
///
/// Returns `TapError::Pattern` if `text` does not compile.
pub fn compile_and_match(text: &str, line: &str) -> Result<Option<Captures>, TapError> {
    let pattern = Pattern::compile("ad hoc", text)?;
    Ok(pattern.captures(line))
}
