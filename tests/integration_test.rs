// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for outlinebot

use outlinebot::audit::audit_tree;
use outlinebot::config::Config;
use outlinebot::document::{element, h1, h4};
use outlinebot::fleet::Severity;
use outlinebot::report::{generate_report, OutputFormat};
use outlinebot::scanner;
use std::path::Path;

#[test]
fn test_scan_clean_fixture() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/clean.html"),
        &Config::default(),
    ).expect("scan should succeed");

    assert!(
        findings.is_empty(),
        "Clean fixture should have no findings, got: {:?}",
        findings.findings.iter().map(|f| &f.rule_id).collect::<Vec<_>>()
    );
}

#[test]
fn test_scan_skipped_fixture() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/skipped.html"),
        &Config::default(),
    ).expect("scan should succeed");

    assert_eq!(findings.len(), 1, "got: {:?}", findings.findings);

    let finding = &findings.findings[0];
    assert_eq!(finding.rule_id, "OUTLINE-skipped-level");
    assert_eq!(finding.line, Some(10));
    assert_eq!(finding.anchor.as_deref(), Some("fine-print"));
    assert!(finding
        .file
        .as_ref()
        .is_some_and(|f| f.ends_with("skipped.html")));
}

#[test]
fn test_scan_duplicate_fixture() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/duplicate.html"),
        &Config::default(),
    ).expect("scan should succeed");

    // Two top-level headings and no skips: exactly one finding.
    assert_eq!(findings.len(), 1, "got: {:?}", findings.findings);
    assert_eq!(findings.findings[0].rule_id, "OUTLINE-duplicate-h1");
    assert!(findings.by_rule("OUTLINE-skipped-level").is_empty());
}

#[test]
fn test_scan_markdown_fixture() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/skipped.md"),
        &Config::default(),
    ).expect("scan should succeed");

    assert_eq!(findings.len(), 1);
    assert_eq!(findings.findings[0].rule_id, "OUTLINE-skipped-level");
    assert_eq!(findings.findings[0].line, Some(5));
}

#[test]
fn test_scan_fixtures_directory() {
    let findings = scanner::scan_directory(
        Path::new("tests/fixtures"),
        &Config::default(),
    ).expect("scan should succeed");

    // One skip per skipped fixture plus the duplicate banner.
    assert!(
        findings.len() >= 3,
        "Fixture directory should have findings from each bad fixture, got {}",
        findings.len()
    );

    // Vendored trees are never scanned.
    assert!(
        findings.findings.iter().all(|f| {
            f.file
                .as_ref()
                .map_or(true, |p| !p.to_string_lossy().contains("node_modules"))
        }),
        "node_modules content must be skipped"
    );
}

#[test]
fn test_severity_escalation_via_config() {
    let config = Config {
        skip_severity: Severity::Error,
        ..Config::default()
    };
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/skipped.html"),
        &config,
    ).expect("scan should succeed");

    assert!(findings.has_errors());
    assert!(findings.blocks_release());
}

#[test]
fn test_tree_audit_and_file_scan_agree() {
    // The same document shape, once as an in-memory tree and once as a
    // fixture on disk, must trip the same rule.
    let tree = element("body")
        .child(h1("Landing").into_node())
        .child(element("main").child(h4("Fine print").anchor("fine-print").into_node()))
        .into();
    let violations = audit_tree(&tree);
    assert_eq!(violations.len(), 1);

    let findings = scanner::scan_file(
        Path::new("tests/fixtures/skipped.html"),
        &Config::default(),
    ).expect("scan should succeed");

    assert_eq!(findings.findings[0].rule_id, violations[0].kind.rule_id());
    assert_eq!(findings.findings[0].message, violations[0].message);
}

#[test]
fn test_json_report_valid() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/duplicate.html"),
        &Config::default(),
    ).expect("scan should succeed");

    let report = generate_report(&findings, OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&report)
        .expect("JSON report should be valid JSON");

    assert!(parsed["findings"].is_array());
    assert!(!parsed["findings"].as_array().unwrap().is_empty());
}

#[test]
fn test_sarif_report_valid() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/skipped.html"),
        &Config::default(),
    ).expect("scan should succeed");

    let report = generate_report(&findings, OutputFormat::Sarif);
    let parsed: serde_json::Value = serde_json::from_str(&report)
        .expect("SARIF report should be valid JSON");

    assert_eq!(parsed["version"], "2.1.0");
    assert!(parsed["runs"].is_array());
    assert!(parsed["runs"][0]["results"].is_array());
    assert!(parsed["runs"][0]["tool"]["driver"]["name"] == "outlinebot");
    assert_eq!(
        parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["region"]["startLine"],
        10
    );
}

#[test]
fn test_text_report_format() {
    let findings = scanner::scan_file(
        Path::new("tests/fixtures/skipped.html"),
        &Config::default(),
    ).expect("scan should succeed");

    let report = generate_report(&findings, OutputFormat::Text);

    assert!(report.contains("Outlinebot Heading Hierarchy Report"));
    assert!(report.contains("OUTLINE-skipped-level"));
    // Default severities are warnings, so the run passes without blocking.
    assert!(report.contains("PASS WITH WARNINGS"));

    let clean = scanner::scan_file(
        Path::new("tests/fixtures/clean.md"),
        &Config::default(),
    ).expect("scan should succeed");
    let report = generate_report(&clean, OutputFormat::Text);
    assert!(report.contains("No outline issues found"));
}
