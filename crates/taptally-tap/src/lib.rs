// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! taptally-tap: Test Anything Protocol output parsing
//!
//! This library crate consumes the line-oriented output of a test program
//! speaking TAP and turns it into a pass/fail [`Summary`] that a test
//! engine can act on.
//!
//! # Example
//!
//! ```no_run
//! use taptally_tap::{TapParser, Verdict};
//!
//! let parser = TapParser::new().unwrap();
//! let stdin = std::io::stdin();
//! let summary = parser.parse(stdin.lock(), std::io::stdout()).unwrap();
//!
//! println!("{}", Verdict::from_summary(&summary));
//! ```

pub mod classify;
pub mod error;
pub mod field;
pub mod options;
pub mod parser;
pub mod pattern;
pub mod plan;
pub mod summary;
pub mod verdict;

pub use classify::{Classification, ClassifierChain, LineClassifier};
pub use error::{ProtocolError, TapError};
pub use options::ParseOptions;
pub use parser::{LineOutcome, ScanState, StreamingParser, TapParser, parse, parse_str};
pub use summary::Summary;
pub use verdict::{Outcome, Verdict};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ProtocolError, TapError};
    pub use crate::parser::{StreamingParser, TapParser, parse_str};
    pub use crate::summary::Summary;
    pub use crate::verdict::{Outcome, Verdict};
}
