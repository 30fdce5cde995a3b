// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Plan line recognition
//!
//! A plan line declares the inclusive range of result indices, optionally
//! followed by a `#` annotation:
//!
//! ```text
//! 1..4
//! 1..0 # SKIP no network available
//! ```

use tracing::debug;

use crate::error::{ProtocolError, TapError};
use crate::field::extract_bounded_integer;
use crate::options::ParseOptions;
use crate::pattern::{Captures, Pattern};
use crate::summary::Summary;

/// Grammar of a plan line
pub const PLAN_PATTERN: &str = r"^([0-9]+)\.\.([0-9]+)(.*#.*)?$";

/// Token in a plan annotation marking the whole suite as skipped
const SKIP_TOKEN: &str = "SKIP";

/// Recognises plan lines and commits them into a [`Summary`]
#[derive(Debug, Clone)]
pub struct PlanRecognizer {
    pattern: Pattern,
    options: ParseOptions,
}

impl PlanRecognizer {
    /// Compile the plan grammar
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` if the grammar fails to compile.
    pub fn new(options: ParseOptions) -> Result<Self, TapError> {
        Ok(Self {
            pattern: Pattern::compile("plan", PLAN_PATTERN)?,
            options,
        })
    }

    /// Try to interpret `line` as a plan
    ///
    /// Returns `true` if the line has the shape of a plan, in which case
    /// `summary` either holds the new plan or a protocol error. Returns
    /// `false`, leaving `summary` untouched, for any other line.
    pub fn try_parse(&self, line: &str, summary: &mut Summary) -> bool {
        let Some(caps) = self.pattern.captures(line) else {
            return false;
        };

        if summary.has_plan() {
            summary.record_error(ProtocolError::DuplicatePlan);
            return true;
        }

        if let Err(err) = self.commit(line, &caps, summary) {
            summary.record_error(err);
        }
        true
    }

    fn commit(
        &self,
        line: &str,
        caps: &Captures,
        summary: &mut Summary,
    ) -> Result<(), ProtocolError> {
        let max_field = self.options.max_field_length;
        let first_index =
            extract_bounded_integer(line, caps.get(1).unwrap_or_default(), max_field)?;
        let last_index =
            extract_bounded_integer(line, caps.get(2).unwrap_or_default(), max_field)?;

        summary.skipped_all = false;
        if let Some(span) = caps.get(3) {
            if span.len() > self.options.max_plan_description {
                return Err(ProtocolError::PlanDescriptionTooLong);
            }

            let annotation = &line[span];
            if let Some(at) = annotation.find(SKIP_TOKEN) {
                let reason = annotation[at + SKIP_TOKEN.len()..].trim();
                summary.skip_reason = (!reason.is_empty()).then(|| reason.to_string());
                summary.skipped_all = true;
                if summary.has_results() {
                    // Skip-all must precede every result and bail-out
                    summary.record_error(ProtocolError::NoPlan);
                }
            }
        }

        if !summary.skipped_all && last_index < first_index {
            return Err(ProtocolError::ReversedPlan);
        }

        debug!(
            first_index,
            last_index,
            skipped_all = summary.skipped_all,
            "Recognised test plan"
        );
        summary.first_index = first_index;
        summary.last_index = last_index;
        Ok(())
    }
}

/// Compile the plan grammar and try to interpret `line` as a plan
///
/// One-shot form of [`PlanRecognizer::try_parse`] using default limits.
///
/// # Errors
///
/// Returns `TapError::Pattern` if the grammar fails to compile.
pub fn try_parse_plan(line: &str, summary: &mut Summary) -> Result<bool, TapError> {
    let recognizer = PlanRecognizer::new(ParseOptions::default())?;
    Ok(recognizer.try_parse(line, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn parse(lines: &[&str]) -> Summary {
        let recognizer = PlanRecognizer::new(ParseOptions::default()).expect("compile");
        let mut summary = Summary::new();
        for line in lines {
            recognizer.try_parse(line, &mut summary);
        }
        summary
    }

    #[test]
    fn test_simple_plan() {
        let summary = parse(&["1..5"]);
        assert_eq!(summary.first_index, 1);
        assert_eq!(summary.last_index, 5);
        assert!(!summary.skipped_all);
        assert_eq!(summary.parse_error, None);
    }

    #[test]
    fn test_non_plan_lines_are_ignored() {
        let recognizer = PlanRecognizer::new(ParseOptions::default()).expect("compile");
        let mut summary = Summary::new();
        assert!(!recognizer.try_parse("ok 1 - foo", &mut summary));
        assert!(!recognizer.try_parse("1..5 trailing", &mut summary));
        assert!(!recognizer.try_parse(" 1..5", &mut summary));
        assert_eq!(summary, Summary::new());
    }

    #[test]
    fn test_duplicate_plan() {
        let summary = parse(&["1..5", "1..5"]);
        assert_eq!(summary.parse_error, Some(ProtocolError::DuplicatePlan));
        assert_eq!(summary.last_index, 5);
    }

    #[test]
    fn test_reversed_plan() {
        let summary = parse(&["5..1"]);
        assert_eq!(summary.parse_error, Some(ProtocolError::ReversedPlan));
        assert!(!summary.has_plan());
    }

    #[test]
    fn test_skip_all_plan() {
        let summary = parse(&["1..0 # SKIP no database"]);
        assert!(summary.skipped_all);
        assert_eq!(summary.skip_reason.as_deref(), Some("no database"));
        assert_eq!(summary.first_index, 1);
        assert_eq!(summary.last_index, 0);
        assert_eq!(summary.parse_error, None);
    }

    #[test]
    fn test_skip_token_is_case_sensitive() {
        let summary = parse(&["1..0 # skip lowercase"]);
        assert!(!summary.skipped_all);
        assert_eq!(summary.parse_error, Some(ProtocolError::ReversedPlan));
    }

    #[test]
    fn test_skip_without_reason() {
        let summary = parse(&["1..0 #SKIP"]);
        assert!(summary.skipped_all);
        assert_eq!(summary.skip_reason, None);
    }

    #[test]
    fn test_skip_after_results_is_an_error() {
        let recognizer = PlanRecognizer::new(ParseOptions::default()).expect("compile");
        let mut summary = Summary {
            ok_count: 1,
            ..Summary::new()
        };
        assert!(recognizer.try_parse("1..0 # SKIP late", &mut summary));
        assert!(summary.skipped_all);
        assert_eq!(summary.parse_error, Some(ProtocolError::NoPlan));
    }

    #[test]
    fn test_plan_annotation_without_skip() {
        let summary = parse(&["1..3 # three tests"]);
        assert!(!summary.skipped_all);
        assert_eq!(summary.last_index, 3);
        assert_eq!(summary.parse_error, None);
    }

    #[test]
    fn test_plan_annotation_too_long() {
        let line = format!("1..0 # SKIP {}", "x".repeat(1100));
        let summary = parse(&[&line]);
        assert_eq!(summary.parse_error, Some(ProtocolError::PlanDescriptionTooLong));
        assert!(!summary.skipped_all);
    }

    #[test]
    fn test_plan_annotation_length_boundary() {
        let options = ParseOptions::default().with_max_plan_description(10);
        let recognizer = PlanRecognizer::new(options).expect("compile");

        // The annotation is everything after the second number
        let mut summary = Summary::new();
        assert!(recognizer.try_parse("1..0 # SKIP ab", &mut summary));
        assert_eq!(summary.parse_error, None);
        assert!(summary.skipped_all);
        assert_eq!(summary.skip_reason.as_deref(), Some("ab"));

        let mut summary = Summary::new();
        assert!(recognizer.try_parse("1..0 # SKIP abc", &mut summary));
        assert_eq!(summary.parse_error, Some(ProtocolError::PlanDescriptionTooLong));
        assert!(!summary.skipped_all);
        assert!(!summary.has_plan());
    }

    #[test]
    fn test_out_of_range_plan() {
        let summary = parse(&["1..99999999999999999999"]);
        assert_eq!(summary.parse_error, Some(ProtocolError::PlanOutOfRange));
        assert!(!summary.has_plan());
    }

    #[test]
    fn test_field_too_long() {
        let line = format!("1..{}", "0".repeat(70));
        let summary = parse(&[&line]);
        assert_eq!(summary.parse_error, Some(ProtocolError::PlanFieldTooLong));
    }

    #[test]
    fn test_one_shot_helper() {
        let mut summary = Summary::new();
        assert!(try_parse_plan("2..4", &mut summary).expect("compile"));
        assert_eq!(summary.planned_count(), Some(3));
    }
}
