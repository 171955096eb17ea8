//! File discovery: walk, classify, number, and order Markdown sources.
//!
//! The walk is glob-based (`**/*.md`, case-insensitive extension) and its
//! results are sorted explicitly — filesystem order is never trusted, so a
//! run is deterministic across platforms. Runbooks come first, ordered by
//! extracted number (ID-less runbooks take a large sentinel), then the
//! additional documents ordered by relative path.

use crate::models::source::{Heading, SourceFile};
use crate::models::AuditIssue;
use glob::{MatchOptions, Pattern};
use once_cell::sync::Lazy;
use pathdiff::diff_paths;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Filename globs that classify a document as a runbook.
pub const RUNBOOK_PATTERNS: &[&str] = &["*RUNBOOK*.md", "RUNBOOK_*.md", "00_RUNBOOK_0_*.md"];

/// Additional documents included in cross-file registries but never carded.
pub const ADDITIONAL_PATTERNS: &[&str] = &[
    "BACKEND_AUDIT_PART_*.md",
    "01_COMPLETE_ARCHITECTURE_MAP.md",
    "02_IMPLEMENTATION_GUIDE.md",
    "README.md",
    "JOURNAL.md",
];

/// Sort sentinel for runbooks without an extracted number.
const UNNUMBERED: u32 = 999;

static HEADING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s+(.*)").expect("regex: heading"));

// Separator-delimited leading zero groups are skipped, so `RUNBOOK_0_07`
// reads as 7 rather than 0.
static RUNBOOK_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)RUNBOOK[_\s\-]*(?:0+[_\s\-]+)*0*(\d+)").expect("regex: runbook number")
});

/// Extract the runbook number from a filename, if present.
pub fn extract_runbook_number(name: &str) -> Option<u32> {
    RUNBOOK_NUMBER_PATTERN
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Parse Markdown headings: one or more leading `#`, whitespace, then text.
pub fn parse_headings(lines: &[String]) -> Vec<Heading> {
    let mut headings = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(caps) = HEADING_PATTERN.captures(line) {
            headings.push(Heading {
                line: idx + 1,
                level: caps[1].len(),
                title: caps[2].trim().to_string(),
            });
        }
    }
    headings
}

fn matches_any(name: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect()
}

/// Discover every matching `.md` file under `root`, excluding `out_dir`.
///
/// Unreadable files become `AuditIssue` records rather than aborting the
/// walk. The returned list is fully sorted per the documented order.
pub fn discover_files(
    root: &Path,
    out_dir: &Path,
    runbook_patterns: &[String],
    additional_patterns: &[String],
) -> (Vec<SourceFile>, Vec<AuditIssue>) {
    let runbook_globs = compile_patterns(runbook_patterns);
    let additional_globs = compile_patterns(additional_patterns);

    let walk_pattern = root.join("**/*.md").to_string_lossy().to_string();
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut discovered: Vec<SourceFile> = Vec::new();
    let mut issues: Vec<AuditIssue> = Vec::new();

    let entries = match glob::glob_with(&walk_pattern, options) {
        Ok(paths) => paths,
        Err(_) => return (discovered, issues),
    };
    for entry in entries.flatten() {
        if entry.starts_with(out_dir) || !entry.is_file() {
            continue;
        }
        let Some(filename) = entry.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_runbook = matches_any(filename, &runbook_globs);
        let include_additional = matches_any(filename, &additional_globs);
        if !is_runbook && !include_additional {
            continue;
        }
        let rel_path = diff_paths(&entry, root)
            .unwrap_or_else(|| entry.clone())
            .to_string_lossy()
            .to_string();
        let text = match fs::read_to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                issues.push(AuditIssue {
                    file: rel_path,
                    message: format!("failed to read: {}", e),
                });
                continue;
            }
        };
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let headings = parse_headings(&lines);
        let runbook_number = if is_runbook {
            extract_runbook_number(filename)
        } else {
            None
        };
        discovered.push(SourceFile {
            path: entry,
            rel_path,
            is_runbook,
            runbook_number,
            lines,
            headings,
            ..Default::default()
        });
    }

    discovered.sort_by(|a, b| {
        let key = |fd: &SourceFile| {
            (
                if fd.is_runbook { 0u8 } else { 1u8 },
                fd.runbook_number.unwrap_or(UNNUMBERED),
            )
        };
        key(a).cmp(&key(b)).then_with(|| a.rel_path.cmp(&b.rel_path))
    });
    (discovered, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_runbook_number_skips_separator_delimited_zeros() {
        assert_eq!(extract_runbook_number("00_RUNBOOK_0_07_setup.md"), Some(7));
        assert_eq!(extract_runbook_number("RUNBOOK_12_foo.md"), Some(12));
        assert_eq!(extract_runbook_number("RUNBOOK-003.md"), Some(3));
        assert_eq!(extract_runbook_number("runbook_5.md"), Some(5));
        assert_eq!(extract_runbook_number("RUNBOOK_0.md"), Some(0));
        assert_eq!(extract_runbook_number("README.md"), None);
    }

    #[test]
    fn test_parse_headings() {
        let lines: Vec<String> = ["# Title", "body", "### Deep  ", "#nospace"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let headings = parse_headings(&lines);
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].line, 1);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].title, "Title");
        assert_eq!(headings[1].line, 3);
        assert_eq!(headings[1].level, 3);
        assert_eq!(headings[1].title, "Deep");
    }

    #[test]
    fn test_discovery_classifies_sorts_and_excludes_output() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::create_dir_all(root.join("_runbook_audit/reports")).unwrap();
        fs::write(root.join("RUNBOOK_2_deploy.md"), "# Deploy\n").unwrap();
        fs::write(root.join("sub/RUNBOOK_1_setup.md"), "# Setup\n").unwrap();
        fs::write(root.join("RUNBOOK_notes.md"), "# Notes\n").unwrap();
        fs::write(root.join("README.md"), "# Readme\n").unwrap();
        fs::write(root.join("JOURNAL.md"), "# Journal\n").unwrap();
        fs::write(root.join("ignored.md"), "# Not matched\n").unwrap();
        fs::write(root.join("notes.txt"), "not markdown\n").unwrap();
        fs::write(
            root.join("_runbook_audit/reports/RUNBOOK_9_gen.md"),
            "# Generated\n",
        )
        .unwrap();

        let (files, issues) = discover_files(
            root,
            &root.join("_runbook_audit"),
            &RUNBOOK_PATTERNS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &ADDITIONAL_PATTERNS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        );
        assert!(issues.is_empty());
        let rels: Vec<&str> = files.iter().map(|f| f.rel_path.as_str()).collect();
        // Numbered runbooks first, then the ID-less runbook, then additional
        // docs alphabetically.
        assert_eq!(
            rels,
            vec![
                "sub/RUNBOOK_1_setup.md",
                "RUNBOOK_2_deploy.md",
                "RUNBOOK_notes.md",
                "JOURNAL.md",
                "README.md",
            ]
        );
        assert!(files[0].is_runbook);
        assert_eq!(files[0].runbook_number, Some(1));
        assert_eq!(files[2].runbook_number, None);
        assert!(!files[3].is_runbook);
    }

    #[test]
    fn test_unreadable_file_is_captured_not_fatal() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("RUNBOOK_1_ok.md"), "fine\n").unwrap();
        fs::write(root.join("RUNBOOK_2_bad.md"), [0xffu8, 0xfe, 0xfd]).unwrap();
        let (files, issues) = discover_files(
            root,
            &root.join("_runbook_audit"),
            &RUNBOOK_PATTERNS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &[],
        );
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rel_path, "RUNBOOK_1_ok.md");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "RUNBOOK_2_bad.md");
        assert!(issues[0].message.starts_with("failed to read"));
    }

    #[test]
    fn test_discovery_reads_lines_and_headings() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("RUNBOOK_1.md"), "# Top\ntext\n## Sub\n").unwrap();
        let (files, _) = discover_files(
            root,
            &root.join("_runbook_audit"),
            &RUNBOOK_PATTERNS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &[],
        );
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].lines.len(), 3);
        assert_eq!(files[0].headings.len(), 2);
        assert_eq!(files[0].headings[1].title, "Sub");
    }
}
