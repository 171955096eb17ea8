//! Named-section lookup over parsed headings.
//!
//! A section is located by the first heading whose title contains any of a
//! set of keyword aliases (case-insensitive substring). Its body runs from
//! the line after the heading up to the next heading of any level, exclusive.
//! A body that is empty after trimming counts as absent, which downstream
//! scoring treats the same as a missing heading.

use crate::models::source::SourceFile;

pub const PURPOSE_KEYWORDS: &[&str] = &["purpose"];
pub const PRODUCES_KEYWORDS: &[&str] = &["produce", "artifact", "output"];
pub const CONSUMES_KEYWORDS: &[&str] = &["consume", "prereq", "input"];
pub const LIFECYCLE_KEYWORDS: &[&str] = &["process", "lifecycle", "startup", "shutdown"];

#[derive(Debug, Clone)]
/// A non-empty section body with its 1-based line range.
pub struct Section {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Find the first heading matching `keywords` and return its body.
///
/// Only the first matching heading is considered; if its body trims to
/// nothing the section is absent even when a later heading would match.
pub fn extract_section(fd: &SourceFile, keywords: &[&str]) -> Option<Section> {
    for (i, h) in fd.headings.iter().enumerate() {
        let title = h.title.to_lowercase();
        if keywords.iter().any(|k| title.contains(k)) {
            let start = h.line + 1;
            let end = match fd.headings.get(i + 1) {
                Some(next) => next.line - 1,
                None => fd.lines.len(),
            };
            let text = fd.lines[start - 1..end].join("\n").trim().to_string();
            if text.is_empty() {
                return None;
            }
            return Some(Section { text, start, end });
        }
    }
    None
}
