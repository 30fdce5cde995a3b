// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Bounded integer extraction from captured line fields

use std::num::IntErrorKind;
use std::ops::Range;

use thiserror::Error;

/// Default upper bound on the length of a numeric field, in bytes
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 63;

/// Errors from [`extract_bounded_integer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The capture is longer than the field limit
    #[error("field too long ({length} bytes)")]
    TooLong {
        /// Length of the rejected capture
        length: usize,
    },

    /// The value does not fit, or sits on the edge of, the integer range
    #[error("value out of range")]
    OutOfRange,

    /// The capture is not entirely a base-10 integer
    #[error("not a number")]
    NotANumber,
}

/// Parse the captured `span` of `line` as an `i64`
///
/// The extremes `i64::MIN` and `i64::MAX` are rejected along with real
/// overflow, so that `last - first + 1` over two extracted values cannot
/// overflow.
///
/// # Errors
///
/// Returns [`FieldError::TooLong`] if the capture exceeds `max_length`
/// bytes, [`FieldError::OutOfRange`] on overflow and
/// [`FieldError::NotANumber`] if the capture is not fully numeric.
pub fn extract_bounded_integer(
    line: &str,
    span: Range<usize>,
    max_length: usize,
) -> Result<i64, FieldError> {
    let length = span.len();
    if length > max_length {
        return Err(FieldError::TooLong { length });
    }

    let text = line.get(span).ok_or(FieldError::NotANumber)?;
    match text.parse::<i64>() {
        Ok(value) if value == i64::MAX || value == i64::MIN => Err(FieldError::OutOfRange),
        Ok(value) => Ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(FieldError::OutOfRange),
            _ => Err(FieldError::NotANumber),
        },
    }
}
