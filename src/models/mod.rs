//! Shared data models: detections, grades, and per-file issue records.

pub mod source;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Category tag for a single scanner detection.
pub enum Category {
    Rest,
    Ipc,
    Schema,
    Verification,
    Risk,
    Invariant,
    File,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rest => "REST",
            Category::Ipc => "IPC",
            Category::Schema => "Schema",
            Category::Verification => "Verification",
            Category::Risk => "Risk",
            Category::Invariant => "Invariant",
            Category::File => "File",
        }
    }
}

#[derive(Debug, Clone)]
/// One regex match with its source location and a truncated snippet.
///
/// Immutable once created; per-file category lists keep appearance order.
pub struct Detection {
    pub kind: Category,
    pub name: String,
    /// Locator in the form `{rel_path}:L{start}-L{end}`.
    pub source: String,
    pub snippet: String,
    pub file: String,
    pub line_start: usize,
    pub line_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Red/yellow/green severity grade. `Red` is worst.
pub enum Grade {
    Red,
    Yellow,
    Green,
    Unspecified,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Red => "RED",
            Grade::Yellow => "YELLOW",
            Grade::Green => "GREEN",
            Grade::Unspecified => "UNSPECIFIED",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A per-file failure captured during discovery instead of aborting the run.
pub struct AuditIssue {
    pub file: String,
    pub message: String,
}
