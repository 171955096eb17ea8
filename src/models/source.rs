//! Discovered Markdown documents and their parsed structure.

use super::Detection;
use std::path::PathBuf;

#[derive(Debug, Clone)]
/// A Markdown heading: 1-based line number, `#` depth, trimmed title.
pub struct Heading {
    pub line: usize,
    pub level: usize,
    pub title: String,
}

#[derive(Debug, Default)]
/// A discovered Markdown document.
///
/// Constructed once at discovery time; the scanner fills the per-category
/// detection lists, after which the value is read-only.
pub struct SourceFile {
    pub path: PathBuf,
    pub rel_path: String,
    pub is_runbook: bool,
    pub runbook_number: Option<u32>,
    pub lines: Vec<String>,
    pub headings: Vec<Heading>,
    pub rest: Vec<Detection>,
    pub ipc: Vec<Detection>,
    pub schemas: Vec<Detection>,
    pub verifications: Vec<Detection>,
    pub risks: Vec<Detection>,
    pub invariants: Vec<Detection>,
    pub files: Vec<Detection>,
}

impl SourceFile {
    /// Line count clamped to at least 1, for `L1-L{n}` ranges on empty files.
    pub fn total_lines(&self) -> usize {
        self.lines.len().max(1)
    }

    /// Locator spanning the whole file.
    pub fn full_range(&self) -> String {
        format!("{}:L1-L{}", self.rel_path, self.total_lines())
    }

    pub fn has_contracts(&self) -> bool {
        !self.rest.is_empty()
            || !self.ipc.is_empty()
            || !self.schemas.is_empty()
            || !self.files.is_empty()
    }
}
