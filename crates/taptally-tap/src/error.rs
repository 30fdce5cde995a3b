// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for taptally-tap
//!
//! Two channels are kept apart on purpose:
//!
//! - [`TapError`] is returned from the parsing entry points when the
//!   infrastructure fails (the stream cannot be read or echoed, a grammar
//!   cannot be compiled). A [`Summary`](crate::Summary) is not produced.
//! - [`ProtocolError`] is recorded inside a successfully returned
//!   [`Summary`](crate::Summary) when the test program's output does not
//!   conform to TAP.

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::field::FieldError;

/// Errors that stop a TAP parse before a summary can be produced
#[derive(Debug, Error)]
pub enum TapError {
    /// Error reading the TAP stream or writing the echo sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The pattern engine rejected one of the line grammars
    #[error("{description}: {source}")]
    Pattern {
        /// What the parser was doing when the engine failed
        description: String,
        /// Source text of the offending pattern
        pattern: String,
        /// Native error reported by the engine
        source: regex::Error,
    },
}

impl TapError {
    /// Type tag of the error, stable across releases
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Pattern { .. } => "regex",
        }
    }

    /// Check the type tag of the error
    #[must_use]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind() == kind
    }

    /// Underlying engine error, if this is a pattern failure
    #[must_use]
    pub fn pattern_error(&self) -> Option<&regex::Error> {
        match self {
            Self::Pattern { source, .. } => Some(source),
            Self::Io(_) => None,
        }
    }
}

/// Ways in which TAP output can violate the protocol
///
/// The messages are part of the public contract: callers match on them
/// when reporting broken test programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Output includes two test plans")]
    DuplicatePlan,

    #[error("Plan line too long")]
    PlanFieldTooLong,

    #[error("Plan line includes out of range numbers")]
    PlanOutOfRange,

    #[error("Description attached to plan too long")]
    PlanDescriptionTooLong,

    #[error("Test plan is reversed")]
    ReversedPlan,

    #[error("No plan found in TAP output")]
    NoPlan,

    #[error("Reported plan differs from actual executed tests")]
    PlanMismatch,

    #[error("Output line too long")]
    LineTooLong,
}

impl ProtocolError {
    /// Every protocol error, in the order the parser can detect them
    pub const ALL: [Self; 8] = [
        Self::DuplicatePlan,
        Self::PlanFieldTooLong,
        Self::PlanOutOfRange,
        Self::PlanDescriptionTooLong,
        Self::ReversedPlan,
        Self::NoPlan,
        Self::PlanMismatch,
        Self::LineTooLong,
    ];

    /// Look up the error reported with `message`
    #[must_use]
    pub fn from_message(message: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.to_string() == message)
    }
}

impl From<FieldError> for ProtocolError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::TooLong { .. } => Self::PlanFieldTooLong,
            FieldError::OutOfRange | FieldError::NotANumber => Self::PlanOutOfRange,
        }
    }
}

impl Serialize for ProtocolError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProtocolError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let message = String::deserialize(deserializer)?;
        Self::from_message(&message)
            .ok_or_else(|| de::Error::custom(format!("unknown TAP protocol error: {message}")))
    }
}
