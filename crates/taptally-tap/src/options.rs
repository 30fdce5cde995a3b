// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Parser limits

use crate::field::DEFAULT_MAX_FIELD_LENGTH;

/// Default line buffer size, in bytes
///
/// A line is accepted if its content, without the trailing newline, is
/// strictly shorter than this.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Default upper bound on the `#` annotation of a plan line, in bytes
pub const DEFAULT_MAX_PLAN_DESCRIPTION: usize = 1024;

/// Limits applied while parsing TAP output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Line buffer size; longer lines are reported as protocol errors
    pub max_line_length: usize,
    /// Longest accepted plan annotation
    pub max_plan_description: usize,
    /// Longest accepted numeric field in a plan line
    pub max_field_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_plan_description: DEFAULT_MAX_PLAN_DESCRIPTION,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
        }
    }
}

impl ParseOptions {
    /// Set the line buffer size
    #[must_use]
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// Set the longest accepted plan annotation
    #[must_use]
    pub fn with_max_plan_description(mut self, length: usize) -> Self {
        self.max_plan_description = length;
        self
    }

    /// Set the longest accepted numeric field
    #[must_use]
    pub fn with_max_field_length(mut self, length: usize) -> Self {
        self.max_field_length = length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let options = ParseOptions::default();
        assert_eq!(options.max_line_length, 1024);
        assert_eq!(options.max_plan_description, 1024);
        assert_eq!(options.max_field_length, 63);
    }

    #[test]
    fn test_builders() {
        let options = ParseOptions::default()
            .with_max_line_length(80)
            .with_max_plan_description(16)
            .with_max_field_length(4);
        assert_eq!(options.max_line_length, 80);
        assert_eq!(options.max_plan_description, 16);
        assert_eq!(options.max_field_length, 4);
    }
}
