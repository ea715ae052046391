// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for outlinebot

use crate::error::{OutlineError, Result};
use crate::fleet::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Report heading levels that jump past the deepest level seen
    pub check_skips: bool,
    /// Report documents with more than one top-level heading
    pub require_single_top_level: bool,
    /// Severity assigned to skipped-level findings
    pub skip_severity: Severity,
    /// Severity assigned to duplicate top-level findings
    pub duplicate_severity: Severity,
    /// Name fragments excluded from directory scans
    pub exclude: Vec<String>,
    /// Treat warnings as failures (CI gate)
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_skips: true,
            require_single_top_level: true,
            skip_severity: Severity::Warning,
            duplicate_severity: Severity::Warning,
            exclude: vec![
                "target".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            strict: false,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("outlinebot")
        .join("config.yml")
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| OutlineError::Config(format!("TOML parse error: {}", e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| OutlineError::Config(format!("YAML parse error: {}", e)))
    }
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::to_string_pretty(&config)
            .map_err(|e| OutlineError::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_both_rules() {
        let config = Config::default();
        assert!(config.check_skips);
        assert!(config.require_single_top_level);
        assert_eq!(config.skip_severity, Severity::Warning);
        assert!(!config.strict);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_default() {
        let config = load_config(Path::new("/nonexistent/outlinebot.yml")).unwrap();
        assert!(config.check_skips);
    }

    #[test]
    fn test_yaml_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "check_skips: true\nrequire_single_top_level: false\nskip_severity: error\nduplicate_severity: warning\nexclude: []\nstrict: true\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.require_single_top_level);
        assert_eq!(config.skip_severity, Severity::Error);
        assert!(config.strict);
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_default_config(&path).unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.require_single_top_level);
        assert_eq!(config.duplicate_severity, Severity::Warning);
    }
}
