//! Line scanner: a fixed table of regex categories applied per line.
//!
//! Each line of each file is tested independently against every category.
//! Categories are not mutually exclusive — one line may yield detections in
//! several of them — but only the first match per category per line is
//! recorded. Files are independent, so scanning fans out with rayon; the
//! per-file lists still follow line order.

use crate::models::source::SourceFile;
use crate::models::{Category, Detection};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

const SNIPPET_WORD_LIMIT: usize = 25;

static REST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(GET|POST|PUT|PATCH|DELETE)\s+(/[A-Za-z0-9_\-/:{}]+)").expect("regex: rest")
});
static IPC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(IPC|channel|port|invoke|handle)\b").expect("regex: ipc"));
static SCHEMA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(LegalDocument|Schema|JSON Schema|Zod)\b").expect("regex: schema")
});
// Declaration pairs are matched case-sensitively, unlike the vocabulary list.
static SCHEMA_INTERFACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(interface|type)\s+([A-Za-z0-9_]+)").expect("regex: schema decl"));
static VERIFICATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Verify|Run:|Command:|drift-detector|npm test|pnpm test|pytest)\b")
        .expect("regex: verification")
});
static RISK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(HIGH RISK|risk|blocker|failure mode|sharp edge)\b").expect("regex: risk")
});
static INVARIANT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\binvariant\b").expect("regex: invariant"));
static FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[\w.\-]+\.(pdf|docx|json|txt|csv|yaml|yml|md)\b").expect("regex: file")
});

/// Join a line's words with single spaces, truncating to `word_limit` words
/// with a trailing ellipsis marker when longer.
pub fn make_snippet(text: &str, word_limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= word_limit {
        words.join(" ")
    } else {
        format!("{}...", words[..word_limit].join(" "))
    }
}

fn detection(kind: Category, name: &str, rel_path: &str, line_no: usize, line: &str) -> Detection {
    Detection {
        kind,
        name: name.trim().to_string(),
        source: format!("{}:L{}-L{}", rel_path, line_no, line_no),
        snippet: make_snippet(line, SNIPPET_WORD_LIMIT),
        file: rel_path.to_string(),
        line_start: line_no,
        line_end: line_no,
    }
}

/// Scan one file, filling its per-category detection lists in line order.
pub fn scan_file(fd: &mut SourceFile) {
    let rel = fd.rel_path.clone();
    let mut rest = Vec::new();
    let mut ipc = Vec::new();
    let mut schemas = Vec::new();
    let mut verifications = Vec::new();
    let mut risks = Vec::new();
    let mut invariants = Vec::new();
    let mut files = Vec::new();

    for (idx, line) in fd.lines.iter().enumerate() {
        let line_no = idx + 1;
        if let Some(caps) = REST_PATTERN.captures(line) {
            let name = format!("{} {}", &caps[1], &caps[2]);
            rest.push(detection(Category::Rest, &name, &rel, line_no, line));
        }
        if IPC_PATTERN.is_match(line) {
            ipc.push(detection(Category::Ipc, line.trim(), &rel, line_no, line));
        }
        if let Some(m) = SCHEMA_PATTERN.find(line) {
            schemas.push(detection(Category::Schema, m.as_str(), &rel, line_no, line));
        }
        if let Some(caps) = SCHEMA_INTERFACE_PATTERN.captures(line) {
            let name = format!("{} {}", &caps[1], &caps[2]);
            schemas.push(detection(Category::Schema, &name, &rel, line_no, line));
        }
        if VERIFICATION_PATTERN.is_match(line) {
            verifications.push(detection(
                Category::Verification,
                line.trim(),
                &rel,
                line_no,
                line,
            ));
        }
        if RISK_PATTERN.is_match(line) {
            risks.push(detection(Category::Risk, line.trim(), &rel, line_no, line));
        }
        if INVARIANT_PATTERN.is_match(line) {
            invariants.push(detection(Category::Invariant, line.trim(), &rel, line_no, line));
        }
        if let Some(m) = FILE_PATTERN.find(line) {
            files.push(detection(Category::File, m.as_str(), &rel, line_no, line));
        }
    }

    fd.rest = rest;
    fd.ipc = ipc;
    fd.schemas = schemas;
    fd.verifications = verifications;
    fd.risks = risks;
    fd.invariants = invariants;
    fd.files = files;
}

/// Scan all files. Per-file work is independent; order is preserved.
pub fn scan_all(files: &mut [SourceFile]) {
    files.par_iter_mut().for_each(scan_file);
}
