// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic heading levels (h1-h6).
//!
//! `HeadingLevel` is the typed currency of the crate: the tracker, the
//! auditor, and the document builders all trade in it, so out-of-range
//! levels are unrepresentable past the construction boundary. Untyped
//! sources (scanned markup, config files) go through `TryFrom<u8>` or
//! [`HeadingLevel::from_tag_name`] and are rejected there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A semantic heading level, h1 (top) through h6 (deepest).
///
/// Ordering follows document-outline depth: `H1 < H2 < ... < H6`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeadingLevel {
    /// Top-level heading (one per document, by convention)
    H1 = 1,
    /// Section heading
    H2 = 2,
    /// Subsection heading
    H3 = 3,
    /// Sub-subsection heading
    H4 = 4,
    /// Minor heading
    H5 = 5,
    /// Deepest heading
    H6 = 6,
}

/// Error for numeric levels outside 1..=6 coming from untyped sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid heading level {0}: heading levels are 1 through 6")]
pub struct InvalidLevel(pub u8);

impl HeadingLevel {
    /// All six levels, shallowest first.
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// Numeric depth, 1..=6.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The markup tag this level renders as (`"h1"`..`"h6"`).
    ///
    /// This is the whole interface handed to the rendering engine: the
    /// core decides which tag, not how it is painted.
    pub fn tag_name(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    /// The immediately-next legal level going deeper (`h6` has none).
    pub fn deeper(self) -> Option<HeadingLevel> {
        HeadingLevel::try_from(self.as_u8() + 1).ok()
    }

    /// Whether this is the document's top level (`h1`).
    pub fn is_top_level(self) -> bool {
        matches!(self, HeadingLevel::H1)
    }

    /// Parse a rendered tag name (`"h1"`..`"h6"`, case-insensitive).
    ///
    /// Boundary helper for the scanner; anything else (including `h7`)
    /// is not a heading.
    pub fn from_tag_name(tag: &str) -> Option<HeadingLevel> {
        let digits = tag
            .strip_prefix('h')
            .or_else(|| tag.strip_prefix('H'))?;
        let n: u8 = digits.parse().ok()?;
        HeadingLevel::try_from(n).ok()
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            4 => Ok(HeadingLevel::H4),
            5 => Ok(HeadingLevel::H5),
            6 => Ok(HeadingLevel::H6),
            other => Err(InvalidLevel(other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        level.as_u8()
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag_name())
    }
}
