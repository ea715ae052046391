// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for running outline audits across a project.
//!
//! Walks directory trees, extracts heading sequences from markup sources
//! in document order, and feeds them through the same audit path the
//! in-process tree auditor uses, so offline reports and live tracking
//! can never disagree about the rules.

use crate::audit::{audit_events, HeadingEvent};
use crate::config::Config;
use crate::fleet::{Finding, FindingSet, Severity};
use crate::level::HeadingLevel;
use crate::rule::{Violation, ViolationKind};
use scraper::{Html, Selector};
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm", "md", "markdown"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// Scan a directory for outline issues
pub fn scan_directory(dir: &Path, config: &Config) -> anyhow::Result<FindingSet> {
    let mut all_findings = FindingSet::new();
    let mut files_scanned = 0;

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // Always descend into the scan root, even when it is "." or
            // hidden; skip checks apply below it.
            if e.depth() == 0 {
                return true;
            }
            // Skip hidden and excluded directories
            let name = e.file_name().to_str().unwrap_or("");
            if config.exclude.iter().any(|ex| name.contains(ex.as_str())) {
                return false;
            }
            if e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if !SCANNABLE_EXTENSIONS.contains(&ext) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                info!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let file_findings = audit_source(path, &content, config);
        all_findings.extend(file_findings.findings);
        files_scanned += 1;
    }

    info!("Scanned {} files, found {} issues", files_scanned, all_findings.len());

    Ok(all_findings)
}

/// Scan a single file for outline issues
pub fn scan_file(path: &Path, config: &Config) -> anyhow::Result<FindingSet> {
    let content = std::fs::read_to_string(path)?;
    Ok(audit_source(path, &content, config))
}

/// Audit one source file's content.
///
/// Each file is its own composition scope; heading state never leaks
/// across files.
pub fn audit_source(path: &Path, content: &str, config: &Config) -> FindingSet {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let events = match ext.as_str() {
        "html" | "htm" => extract_html_events(content),
        "md" | "markdown" => extract_markdown_events(content),
        _ => Vec::new(),
    };

    let mut findings = FindingSet::new();
    for violation in audit_events(events) {
        if !rule_enabled(&violation, config) {
            continue;
        }
        let severity = rule_severity(&violation, config);
        findings.add(Finding::from_violation(&violation, severity).with_file(path.to_path_buf()));
    }
    findings
}

fn rule_enabled(violation: &Violation, config: &Config) -> bool {
    match violation.kind {
        ViolationKind::SkippedLevel => config.check_skips,
        ViolationKind::DuplicateTopLevel => config.require_single_top_level,
    }
}

fn rule_severity(violation: &Violation, config: &Config) -> Severity {
    match violation.kind {
        ViolationKind::SkippedLevel => config.skip_severity,
        ViolationKind::DuplicateTopLevel => config.duplicate_severity,
    }
}

/// Extract heading events from an HTML document in document order.
fn extract_html_events(content: &str) -> Vec<HeadingEvent> {
    let document = Html::parse_document(content);
    let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");

    let mut events = Vec::new();
    let mut cursor = LineCursor::new(content);

    for el in document.select(&heading_sel) {
        let Some(level) = HeadingLevel::from_tag_name(el.value().name()) else {
            continue;
        };

        let mut event = HeadingEvent::new(level);
        if let Some(id) = el.value().attr("id") {
            event = event.with_anchor(id);
        }
        if let Some(line) = cursor.find_tag(level.tag_name()) {
            event = event.with_line(line);
        }
        events.push(event);
    }

    events
}

/// Extract heading events from ATX markdown headings in document order.
fn extract_markdown_events(content: &str) -> Vec<HeadingEvent> {
    let mut events = Vec::new();
    let mut in_fence = false;

    for (idx, line) in content.lines().enumerate() {
        // ATX headings allow at most three leading spaces; deeper
        // indentation is a code block.
        let indent = line.len() - line.trim_start_matches(' ').len();
        let trimmed = line.trim_start_matches(' ');

        if indent <= 3 && (trimmed.starts_with("```") || trimmed.starts_with("~~~")) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || indent > 3 || !trimmed.starts_with('#') {
            continue;
        }

        let hashes = trimmed.chars().take_while(|&c| c == '#').count();
        if hashes > 6 {
            continue;
        }
        // The marker run must be followed by whitespace or end the line.
        let rest = &trimmed[hashes..];
        if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')) {
            continue;
        }

        if let Ok(level) = HeadingLevel::try_from(hashes as u8) {
            events.push(HeadingEvent::new(level).with_line(idx + 1));
        }
    }

    events
}

/// Forward-only line lookup for heading tags.
///
/// Searching resumes after the previous match so repeated headings of
/// the same level resolve to successive lines rather than all pointing
/// at the first occurrence.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    next: usize,
}

impl<'a> LineCursor<'a> {
    fn new(content: &'a str) -> Self {
        LineCursor {
            lines: content.lines().collect(),
            next: 0,
        }
    }

    fn find_tag(&mut self, tag: &str) -> Option<usize> {
        let needle = format!("<{}", tag);
        for (offset, line) in self.lines[self.next..].iter().enumerate() {
            if line.to_lowercase().contains(&needle) {
                let idx = self.next + offset;
                self.next = idx + 1;
                return Some(idx + 1);
            }
        }
        // Minified markup can put several headings on one already-consumed
        // line; fall back to a whole-document search.
        self.lines
            .iter()
            .position(|l| l.to_lowercase().contains(&needle))
            .map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::HeadingLevel::{H1, H2, H3, H4};

    #[test]
    fn test_scan_nonexistent_dir() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
        // Should succeed with empty findings (walkdir handles missing dirs gracefully)
        assert!(result.is_ok());
    }

    #[test]
    fn test_html_extraction_is_document_order() {
        let html = r#"
            <html><body>
                <h1 id="top">Title</h1>
                <main>
                    <h2>Section</h2>
                    <div><h3>Subsection</h3></div>
                </main>
                <h2>Another section</h2>
            </body></html>
        "#;
        let events = extract_html_events(html);
        let levels: Vec<_> = events.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![H1, H2, H3, H2]);
        assert_eq!(events[0].anchor.as_deref(), Some("top"));
    }

    #[test]
    fn test_html_repeated_levels_get_successive_lines() {
        let html = "<html><body>\n<h2>First</h2>\n<p>copy</p>\n<h2>Second</h2>\n</body></html>";
        let events = extract_html_events(html);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].line, Some(2));
        assert_eq!(events[1].line, Some(4));
    }

    #[test]
    fn test_html_skip_becomes_finding_with_location() {
        let html = "<html><body>\n<h1>Title</h1>\n<h4 id=\"deep\">Too deep</h4>\n</body></html>";
        let findings = audit_source(Path::new("page.html"), html, &Config::default());
        assert_eq!(findings.len(), 1);

        let finding = &findings.findings[0];
        assert_eq!(finding.rule_id, "OUTLINE-skipped-level");
        assert_eq!(finding.line, Some(3));
        assert_eq!(finding.anchor.as_deref(), Some("deep"));
        assert_eq!(finding.element.as_deref(), Some("<h4>"));
    }

    #[test]
    fn test_html_duplicate_top_level_finding() {
        let html = r#"
            <html><body>
                <h1>One</h1>
                <h2>Fine</h2>
                <h1>Two</h1>
            </body></html>
        "#;
        let findings = audit_source(Path::new("page.html"), html, &Config::default());
        assert_eq!(findings.by_rule("OUTLINE-duplicate-h1").len(), 1);
        assert!(findings.by_rule("OUTLINE-skipped-level").is_empty());
    }

    #[test]
    fn test_markdown_extraction() {
        let md = "# Title\n\nintro copy\n\n## Section\n\n#### Too deep\n";
        let events = extract_markdown_events(md);
        let levels: Vec<_> = events.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![H1, H2, H4]);
        assert_eq!(events[2].line, Some(7));
    }

    #[test]
    fn test_markdown_ignores_fences_and_non_headings() {
        let md = "\
# Title

```sh
# this is a shell comment, not a heading
```

####### seven hashes is not a heading
#hashtag without a space is not a heading

    # indented four spaces is code

## Section
";
        let events = extract_markdown_events(md);
        let levels: Vec<_> = events.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![H1, H2]);
    }

    #[test]
    fn test_markdown_skip_finding_has_line() {
        let md = "# Title\n\n#### Deep\n";
        let findings = audit_source(Path::new("README.md"), md, &Config::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.findings[0].line, Some(3));
        assert!(findings.findings[0]
            .suggestion
            .as_deref()
            .is_some_and(|s| s.contains("<h2>")));
    }

    #[test]
    fn test_config_gates_disable_rules() {
        let html = "<html><body><h1>A</h1><h4>Deep</h4><h1>B</h1></body></html>";

        let skips_off = Config {
            check_skips: false,
            ..Config::default()
        };
        let findings = audit_source(Path::new("page.html"), html, &skips_off);
        assert!(findings.by_rule("OUTLINE-skipped-level").is_empty());
        assert_eq!(findings.by_rule("OUTLINE-duplicate-h1").len(), 1);

        let duplicates_off = Config {
            require_single_top_level: false,
            ..Config::default()
        };
        let findings = audit_source(Path::new("page.html"), html, &duplicates_off);
        assert_eq!(findings.by_rule("OUTLINE-skipped-level").len(), 1);
        assert!(findings.by_rule("OUTLINE-duplicate-h1").is_empty());
    }

    #[test]
    fn test_unknown_extension_is_ignored() {
        let findings = audit_source(Path::new("main.rs"), "# not markdown", &Config::default());
        assert!(findings.is_empty());
    }
}
