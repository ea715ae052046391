// SPDX-License-Identifier: PMPL-1.0-or-later
//! Fleet integration types for gitbot-fleet shared-context compatibility.
//!
//! These types mirror the gitbot-shared-context crate API so that
//! outlinebot can produce findings consumable by the fleet coordinator.
//! When gitbot-shared-context is published as a crate, this module can
//! be replaced with a direct dependency.
//!
//! [`Finding`] is the outward, enveloped form of a core
//! [`crate::rule::Violation`]: it adds identity, provenance, and a
//! timestamp for fleet aggregation. The core violation stays free of
//! those so audits remain value-comparable and idempotent.

use crate::rule::Violation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Severity levels for findings (mirrors gitbot-shared-context::Severity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical issue - blocks release
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
    /// Suggestion for improvement
    Suggestion,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
            Severity::Suggestion => write!(f, "SUGGESTION"),
        }
    }
}

/// A finding from an outline analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Source bot identifier
    pub source: String,
    /// Rule/check identifier (e.g., "OUTLINE-skipped-level")
    pub rule_id: String,
    /// Human-readable rule name
    pub rule_name: String,
    /// Severity level
    pub severity: Severity,
    /// Detailed message
    pub message: String,
    /// Category (e.g., "outline/hierarchy")
    pub category: String,
    /// File where issue was found
    pub file: Option<PathBuf>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Heading element involved (e.g., "<h4>")
    pub element: Option<String>,
    /// Deep-link identifier of the heading, when it has one
    pub anchor: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
    /// Whether this can be auto-fixed
    pub fixable: bool,
    /// Fix was applied
    pub fixed: bool,
    /// When this finding was created
    pub created_at: DateTime<Utc>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: "outlinebot".to_string(),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: String::new(),
            file: None,
            line: None,
            column: None,
            element: None,
            anchor: None,
            suggestion: None,
            fixable: false,
            fixed: false,
            created_at: Utc::now(),
        }
    }

    /// Envelope a core violation for fleet consumption.
    pub fn from_violation(violation: &Violation, severity: Severity) -> Self {
        let mut finding = Finding::new(violation.kind.rule_id(), severity, &violation.message)
            .with_rule_name(violation.kind.rule_name())
            .with_category("outline/hierarchy")
            .with_element(&format!("<{}>", violation.observed.tag_name()))
            .with_suggestion(&violation.suggestion);
        if let Some(line) = violation.line {
            finding = finding.with_line(line);
        }
        if let Some(anchor) = &violation.anchor {
            finding = finding.with_anchor(anchor);
        }
        finding
    }

    /// Set the category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the rule name
    pub fn with_rule_name(mut self, name: &str) -> Self {
        self.rule_name = name.to_string();
        self
    }

    /// Set file location
    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Set line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the heading element
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    /// Set the deep-link anchor
    pub fn with_anchor(mut self, anchor: &str) -> Self {
        self.anchor = Some(anchor.to_string());
        self
    }

    /// Set suggestion
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.file, self.line) {
            (Some(f), Some(l)) => format!("{}:{}", f.display(), l),
            (Some(f), None) => f.display().to_string(),
            _ => "<unknown>".to_string(),
        }
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSet {
    /// All findings
    pub findings: Vec<Finding>,
}

impl FindingSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Extend with findings from an iterator
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Get findings by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    /// Get findings by rule identifier
    pub fn by_rule(&self, rule_id: &str) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule_id == rule_id).collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
