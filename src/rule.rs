// SPDX-License-Identifier: PMPL-1.0-or-later
//! The heading-hierarchy violation rule.
//!
//! One pure, deterministic predicate shared by the live tracker, the
//! static auditor, and the scanner, so all three analysis paths agree on
//! what a violation is and how it is worded. Exactly two violation kinds
//! exist; a violation is a data-quality finding, never an error, and
//! nothing in this module logs, throws, or blocks.

use crate::level::HeadingLevel;
use serde::{Deserialize, Serialize};

/// The two kinds of hierarchy violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A heading more than one step deeper than the scope's watermark.
    SkippedLevel,
    /// A second (or later) `h1` within a single audited document.
    DuplicateTopLevel,
}

impl ViolationKind {
    /// Stable rule identifier used in findings and reports.
    pub fn rule_id(self) -> &'static str {
        match self {
            ViolationKind::SkippedLevel => "OUTLINE-skipped-level",
            ViolationKind::DuplicateTopLevel => "OUTLINE-duplicate-h1",
        }
    }

    /// Human-readable rule name.
    pub fn rule_name(self) -> &'static str {
        match self {
            ViolationKind::SkippedLevel => "Outline Integrity: Skipped Heading Level",
            ViolationKind::DuplicateTopLevel => "Outline Integrity: Duplicate Top-Level Heading",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::SkippedLevel => write!(f, "skipped level"),
            ViolationKind::DuplicateTopLevel => write!(f, "duplicate top-level heading"),
        }
    }
}

/// A single hierarchy violation.
///
/// Plain deterministic value: two audits of the same tree produce equal
/// violation lists, so no ids or timestamps live here (the outward fleet
/// finding carries those).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Which rule was broken.
    pub kind: ViolationKind,
    /// The offending heading's level.
    pub observed: HeadingLevel,
    /// The watermark the heading was judged against (`None` = empty scope).
    pub prior: Option<HeadingLevel>,
    /// Detailed message naming both levels.
    pub message: String,
    /// Suggested fix naming the immediately-next legal level.
    pub suggestion: String,
    /// Source line of the offending heading, when known (1-indexed).
    pub line: Option<usize>,
    /// Stable anchor/id of the offending heading, when it has one.
    pub anchor: Option<String>,
}

impl Violation {
    fn skipped(prior: HeadingLevel, observed: HeadingLevel, suggested: HeadingLevel) -> Self {
        Violation {
            kind: ViolationKind::SkippedLevel,
            observed,
            prior: Some(prior),
            message: format!(
                "Heading level skipped from <{}> to <{}>. Do not skip heading levels.",
                prior, observed
            ),
            suggestion: format!(
                "Use <{}> instead of <{}>, or add intermediate heading levels",
                suggested, observed
            ),
            line: None,
            anchor: None,
        }
    }

    /// Attach the source line of the offending heading.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the stable anchor of the offending heading.
    pub fn with_anchor(mut self, anchor: &str) -> Self {
        self.anchor = Some(anchor.to_string());
        self
    }
}

/// Evaluate the skip rule for one heading against the current watermark.
///
/// Returns a [`ViolationKind::SkippedLevel`] violation iff the observed
/// level is more than one step deeper than the watermark. An empty
/// watermark (`prior = None`, "no heading yet") never violates: the rule
/// governs relative depth jumps, not the absolute starting level, so a
/// component tree mounted at a non-zero base level starts clean.
///
/// Going shallower or staying at the same depth never violates. Pure and
/// total over its domain; no side effects.
pub fn check_skip(prior: Option<HeadingLevel>, observed: HeadingLevel) -> Option<Violation> {
    let prior = prior?;
    match prior.deeper() {
        Some(next) if observed > next => Some(Violation::skipped(prior, observed, next)),
        _ => None,
    }
}

/// Construct the auditor's duplicate-top-level violation.
///
/// `occurrence` is the 1-based position of the offending `h1` among all
/// `h1` headings in the document (so the first duplicate is occurrence 2).
pub fn duplicate_top_level(occurrence: usize) -> Violation {
    Violation {
        kind: ViolationKind::DuplicateTopLevel,
        observed: HeadingLevel::H1,
        prior: Some(HeadingLevel::H1),
        message: format!(
            "Duplicate top-level heading: <h1> occurrence {} in this document. \
             A document should have exactly one top-level heading.",
            occurrence
        ),
        suggestion: "Demote the extra <h1> to <h2> or deeper, or split the content \
                     into separate documents"
            .to_string(),
        line: None,
        anchor: None,
    }
}
