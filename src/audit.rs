// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static hierarchy audit over finished trees and extracted sequences.
//!
//! Where the live tracker validates emissions as a document is composed,
//! the auditor answers the same question after the fact: it walks an
//! already-built tree in document order, re-derives the heading sequence,
//! and applies the identical skip rule against a watermark kept locally
//! to the call. It never touches a [`crate::tracker::HierarchyScope`],
//! never logs, and never fails: a tree with no headings audits to an
//! empty list.
//!
//! The audit additionally reports duplicate top-level headings, a
//! whole-document property the live tracker cannot own because no single
//! emission sees the full document.

use crate::document::Node;
use crate::level::HeadingLevel;
use crate::rule::{check_skip, duplicate_top_level, Violation};

/// One heading occurrence extracted from a tree or a source file.
///
/// Transient: produced and consumed within a single audit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEvent {
    pub level: HeadingLevel,
    /// Stable identifier of the heading, when the source carries one.
    pub anchor: Option<String>,
    /// 1-based source line, when extracted from a file.
    pub line: Option<usize>,
}

impl HeadingEvent {
    pub fn new(level: HeadingLevel) -> Self {
        HeadingEvent {
            level,
            anchor: None,
            line: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.level.is_top_level()
    }
}

/// Audit an extracted heading sequence in document order.
///
/// This is the single evaluation path behind [`audit_tree`] and the
/// offline file scanner, so every consumer gets identical rule
/// semantics. Violations carry the line/anchor of the offending event
/// when the event has them.
pub fn audit_events<I>(events: I) -> Vec<Violation>
where
    I: IntoIterator<Item = HeadingEvent>,
{
    let mut violations = Vec::new();
    let mut watermark: Option<HeadingLevel> = None;
    let mut top_level_seen = 0usize;

    for event in events {
        if let Some(violation) = check_skip(watermark, event.level) {
            violations.push(locate(violation, &event));
        }
        watermark = Some(watermark.map_or(event.level, |w| w.max(event.level)));

        if event.is_top_level() {
            top_level_seen += 1;
            // One violation per extra occurrence beyond the first.
            if top_level_seen > 1 {
                violations.push(locate(duplicate_top_level(top_level_seen), &event));
            }
        }
    }

    violations
}

/// Audit a materialized document tree.
///
/// Depth-first, document-order traversal; non-heading nodes are
/// traversed transparently without affecting level tracking.
pub fn audit_tree(root: &Node) -> Vec<Violation> {
    let mut events = Vec::new();
    collect_events(root, &mut events);
    audit_events(events)
}

fn collect_events(node: &Node, events: &mut Vec<HeadingEvent>) {
    match node {
        Node::Heading(heading) => {
            let mut event = HeadingEvent::new(heading.level);
            if let Some(anchor) = &heading.anchor {
                event = event.with_anchor(anchor.clone());
            }
            events.push(event);
        }
        Node::Element(element) => {
            for child in &element.children {
                collect_events(child, events);
            }
        }
        Node::Text(_) => {}
    }
}

fn locate(violation: Violation, event: &HeadingEvent) -> Violation {
    let violation = match event.line {
        Some(line) => violation.with_line(line),
        None => violation,
    };
    match &event.anchor {
        Some(anchor) => violation.with_anchor(anchor),
        None => violation,
    }
}
