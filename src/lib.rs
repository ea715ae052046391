// SPDX-License-Identifier: PMPL-1.0-or-later
//! Outlinebot - Document Outline Integrity Bot
//!
//! Part of the gitbot-fleet ecosystem. Outlinebot is a Tier 2 (Finisher)
//! bot that enforces heading-hierarchy integrity: documents descend one
//! level at a time from the deepest point reached so far, and carry
//! exactly one top-level heading.
//!
//! ## Philosophy
//!
//! One rule, two analysis modes. Headings are registered live as a
//! document is composed from sections that know nothing about each
//! other, and audited statically once a tree (or a source directory) is
//! finished. Both modes evaluate the identical skip rule, so they can
//! never disagree. Violations are findings, never errors: rendering and
//! audits always complete.
//!
//! ## Modules
//!
//! - **level**: the six heading levels as a closed domain type
//! - **rule**: the shared violation rule, pure and deterministic
//! - **tracker**: live composition scope with a monotonic watermark
//! - **audit**: static document-order audit of finished trees
//! - **document**: typed node tree and the h1..h6 construction surface
//! - **fleet**: finding envelope for gitbot-fleet aggregation
//! - **report**: text, JSON, and SARIF report generation
//! - **scanner**: offline HTML/markdown source-tree walker
//! - **config**: rule gates, severities, and scan exclusions

pub mod audit;
pub mod config;
pub mod document;
pub mod error;
pub mod fleet;
pub mod level;
pub mod report;
pub mod rule;
pub mod scanner;
pub mod tracker;
