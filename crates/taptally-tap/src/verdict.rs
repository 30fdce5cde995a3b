// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test program verdicts derived from a finished [`Summary`]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::summary::Summary;

/// Possible outcomes of a TAP test program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every result passed
    Passed,
    /// At least one result failed, or the program bailed out
    Failed,
    /// The plan skipped the whole suite
    Skipped,
    /// The output did not conform to TAP
    Broken,
}

impl Outcome {
    /// Process exit status conventionally reported for this outcome
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed | Self::Skipped => 0,
            Self::Failed => 1,
            Self::Broken => 2,
        }
    }

    /// Whether the outcome should be treated as success
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Passed | Self::Skipped)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Broken => "broken",
        };
        f.write_str(text)
    }
}

/// Outcome of a test program with an optional explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The outcome
    pub outcome: Outcome,
    /// Why the outcome is not a plain pass
    pub reason: Option<String>,
}

impl Verdict {
    /// Derive the verdict of a finished summary
    ///
    /// Protocol errors take precedence over bail-outs, which take
    /// precedence over skip-all plans and failed results.
    #[must_use]
    pub fn from_summary(summary: &Summary) -> Self {
        if let Some(error) = summary.parse_error {
            return Self::with_reason(
                Outcome::Broken,
                format!("TAP test program yielded invalid data: {error}"),
            );
        }

        if summary.bail_out {
            return Self::with_reason(Outcome::Failed, "Bailed out");
        }

        if summary.skipped_all {
            let reason = summary
                .skip_reason
                .clone()
                .unwrap_or_else(|| "No reason specified".to_string());
            return Self::with_reason(Outcome::Skipped, reason);
        }

        if summary.not_ok_count > 0 {
            return Self::with_reason(
                Outcome::Failed,
                format!(
                    "{} of {} tests failed",
                    summary.not_ok_count,
                    summary.executed_count()
                ),
            );
        }

        Self {
            outcome: Outcome::Passed,
            reason: None,
        }
    }

    fn with_reason(outcome: Outcome, reason: impl Into<String>) -> Self {
        Self {
            outcome,
            reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {}", self.outcome, reason),
            None => write!(f, "{}", self.outcome),
        }
    }
}
