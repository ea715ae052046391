// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for outlinebot
//!
//! These cover the tool's operational failures only. A hierarchy
//! violation is a finding, not an error: it is collected and reported,
//! never raised through this type.

use crate::level::InvalidLevel;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutlineError>;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid heading level: {0}")]
    Level(#[from] InvalidLevel),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
