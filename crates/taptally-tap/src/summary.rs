// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Accumulated state of a TAP parse

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Value of [`Summary::first_index`] before a plan has been seen
pub const NO_PLAN: i64 = -1;

/// Pass/fail tally of a TAP stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// First index of the declared plan, or [`NO_PLAN`]
    pub first_index: i64,
    /// Last index of the declared plan
    pub last_index: i64,
    /// Result lines counted as passing
    pub ok_count: u64,
    /// Result lines counted as failing
    pub not_ok_count: u64,
    /// Whether a `Bail out!` line was seen
    pub bail_out: bool,
    /// Whether the plan declared the whole suite as skipped
    pub skipped_all: bool,
    /// Reason given after `SKIP` in a skip-all plan, if any
    pub skip_reason: Option<String>,
    /// First protocol violation found; never overwritten once set
    pub parse_error: Option<ProtocolError>,
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

impl Summary {
    /// Create an empty summary with no plan
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_index: NO_PLAN,
            last_index: NO_PLAN,
            ok_count: 0,
            not_ok_count: 0,
            bail_out: false,
            skipped_all: false,
            skip_reason: None,
            parse_error: None,
        }
    }

    /// Whether a plan line has been committed
    #[must_use]
    pub fn has_plan(&self) -> bool {
        self.first_index != NO_PLAN
    }

    /// Record a protocol violation unless one is already recorded
    pub fn record_error(&mut self, error: ProtocolError) {
        if self.parse_error.is_none() {
            self.parse_error = Some(error);
        }
    }

    /// Number of classified result lines
    #[must_use]
    pub fn executed_count(&self) -> u64 {
        self.ok_count + self.not_ok_count
    }

    /// Number of results the plan announces, or `None` without a plan
    ///
    /// Negative for a reversed skip-all plan.
    #[must_use]
    pub fn planned_count(&self) -> Option<i64> {
        self.has_plan()
            .then(|| self.last_index - self.first_index + 1)
    }

    /// Whether the plan still matches the results, as checked at end of stream
    #[must_use]
    pub fn plan_matches(&self) -> bool {
        match self.planned_count() {
            Some(planned) => i64::try_from(self.executed_count()).is_ok_and(|n| n == planned),
            None => false,
        }
    }

    /// Whether any result line or bail-out has been recorded
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.ok_count > 0 || self.not_ok_count > 0 || self.bail_out
    }

    /// Human-readable protocol error, if any
    #[must_use]
    pub fn parse_error_message(&self) -> Option<String> {
        self.parse_error.map(|e| e.to_string())
    }
}
