// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Result line classification
//!
//! TAP result lines come in two flavours, tried in order:
//!
//! 1. simple tests: `ok 3 description` / `not ok 3 description`
//! 2. tests: anything starting with `ok`/`not ok`, with optional number,
//!    description and `#` directive
//!
//! The first classifier that recognises a line decides its outcome.

use std::fmt;

use serde::Serialize;

use crate::error::TapError;
use crate::pattern::Pattern;

/// Grammar of a "simple test" result line
pub const SIMPLE_RESULT_PATTERN: &str = r"^(not )?ok[ \t]+[0-9]+[ \t]+([^#]+)?$";

/// Grammar of a general result line
pub const RESULT_PATTERN: &str = r"^(not )?ok[ \t]*([0-9]+)?([^#]+)?(.*)?$";

/// Outcome of a single result line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Counts towards `ok_count`
    Pass,
    /// Counts towards `not_ok_count`
    Fail,
}

/// A strategy for classifying result lines
pub trait LineClassifier: fmt::Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Classify `line`, or return `None` if the grammar does not apply
    fn classify(&self, line: &str) -> Option<Classification>;
}

/// Strict `(not )?ok N description` grammar
#[derive(Debug, Clone)]
pub struct SimpleResultClassifier {
    pattern: Pattern,
}

impl SimpleResultClassifier {
    /// Compile the simple result grammar
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` if the grammar fails to compile.
    pub fn new() -> Result<Self, TapError> {
        Ok(Self {
            pattern: Pattern::compile("simple result", SIMPLE_RESULT_PATTERN)?,
        })
    }
}

impl LineClassifier for SimpleResultClassifier {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn classify(&self, line: &str) -> Option<Classification> {
        let caps = self.pattern.captures(line)?;
        if caps.is_present(1) {
            Some(Classification::Fail)
        } else {
            Some(Classification::Pass)
        }
    }
}

/// Permissive grammar honouring SKIP and TODO directives
///
/// Only a `not ok` line carrying a `#` comment without SKIP or TODO is a
/// failure. A bare `not ok` with no comment counts as a pass; consumers
/// rely on that.
#[derive(Debug, Clone)]
pub struct ResultClassifier {
    pattern: Pattern,
}

impl ResultClassifier {
    /// Compile the general result grammar
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` if the grammar fails to compile.
    pub fn new() -> Result<Self, TapError> {
        Ok(Self {
            pattern: Pattern::compile("result", RESULT_PATTERN)?,
        })
    }
}

impl LineClassifier for ResultClassifier {
    fn name(&self) -> &'static str {
        "general"
    }

    fn classify(&self, line: &str) -> Option<Classification> {
        let caps = self.pattern.captures(line)?;
        let comment = caps.text(line, 4).filter(|c| !c.is_empty());
        match comment {
            Some(comment) if caps.is_present(1) && !has_directive(comment) => {
                Some(Classification::Fail)
            }
            _ => Some(Classification::Pass),
        }
    }
}

/// Whether a comment carries a SKIP or TODO directive, in any case
fn has_directive(comment: &str) -> bool {
    let comment = comment.to_ascii_lowercase();
    comment.contains("skip") || comment.contains("todo")
}

/// Ordered list of classifiers; the first that applies wins
#[derive(Debug)]
pub struct ClassifierChain {
    classifiers: Vec<Box<dyn LineClassifier>>,
}

impl ClassifierChain {
    /// The standard chain: simple grammar, then general grammar
    ///
    /// # Errors
    ///
    /// Returns `TapError::Pattern` if a grammar fails to compile.
    pub fn standard() -> Result<Self, TapError> {
        let classifiers: Vec<Box<dyn LineClassifier>> = vec![
            Box::new(SimpleResultClassifier::new()?),
            Box::new(ResultClassifier::new()?),
        ];
        Ok(Self::from_classifiers(classifiers))
    }

    /// Build a chain from an explicit list of classifiers
    #[must_use]
    pub fn from_classifiers(classifiers: Vec<Box<dyn LineClassifier>>) -> Self {
        Self { classifiers }
    }

    /// Classify `line` with the first applicable classifier
    ///
    /// Returns the outcome along with the name of the classifier that
    /// decided it, or `None` if no grammar applies.
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<(Classification, &'static str)> {
        self.classifiers
            .iter()
            .find_map(|c| c.classify(line).map(|outcome| (outcome, c.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn chain() -> ClassifierChain {
        ClassifierChain::standard().expect("compile")
    }

    #[test]
    fn test_simple_grammar() {
        let chain = chain();
        assert_eq!(
            chain.classify("ok 1 - foo"),
            Some((Classification::Pass, "simple"))
        );
        assert_eq!(
            chain.classify("not ok 2 - foo"),
            Some((Classification::Fail, "simple"))
        );
        assert_eq!(
            chain.classify("ok\t3\tbar"),
            Some((Classification::Pass, "simple"))
        );
    }

    #[test]
    fn test_directive_suppresses_failure() {
        let chain = chain();
        assert_eq!(
            chain.classify("not ok 1 - foo # TODO not yet"),
            Some((Classification::Pass, "general"))
        );
        assert_eq!(
            chain.classify("not ok 1 - foo # skip no network"),
            Some((Classification::Pass, "general"))
        );
    }

    #[test]
    fn test_commented_failure() {
        let chain = chain();
        assert_eq!(
            chain.classify("not ok 1 - foo # timed out"),
            Some((Classification::Fail, "general"))
        );
    }

    #[test]
    fn test_bare_not_ok_counts_as_pass() {
        let chain = chain();
        assert_eq!(
            chain.classify("not ok"),
            Some((Classification::Pass, "general"))
        );
        assert_eq!(
            chain.classify("not ok 4"),
            Some((Classification::Pass, "general"))
        );
        assert_eq!(
            chain.classify("not ok - no number"),
            Some((Classification::Pass, "general"))
        );
    }

    #[test]
    fn test_ok_with_comment() {
        let chain = chain();
        assert_eq!(
            chain.classify("ok 1 # all good"),
            Some((Classification::Pass, "general"))
        );
        assert_eq!(chain.classify("ok"), Some((Classification::Pass, "general")));
    }

    #[test]
    fn test_unrelated_lines() {
        let chain = chain();
        assert_eq!(chain.classify("# diagnostic"), None);
        assert_eq!(chain.classify("  ok 1"), None);
        assert_eq!(chain.classify("Bail out!"), None);
        assert_eq!(chain.classify("1..3"), None);
    }

    #[test]
    fn test_has_directive() {
        assert!(has_directive("# SKIP"));
        assert!(has_directive("# Todo later"));
        assert!(!has_directive("# failed"));
    }

    #[derive(Debug)]
    struct AlwaysFail;

    impl LineClassifier for AlwaysFail {
        fn name(&self) -> &'static str {
            "always-fail"
        }

        fn classify(&self, _line: &str) -> Option<Classification> {
            Some(Classification::Fail)
        }
    }

    #[test]
    fn test_custom_chain_order() {
        let classifiers: Vec<Box<dyn LineClassifier>> = vec![
            Box::new(AlwaysFail),
            Box::new(SimpleResultClassifier::new().expect("compile")),
        ];
        let chain = ClassifierChain::from_classifiers(classifiers);
        assert_eq!(
            chain.classify("ok 1 - foo"),
            Some((Classification::Fail, "always-fail"))
        );
    }
}
