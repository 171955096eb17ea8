//! Per-runbook card rendering.
//!
//! A card is a fixed-structure document: purpose/produces/consumes sections,
//! the interfaces the runbook touches, its contracts, invariants, the
//! verification gate, and risks. Every absent piece renders an UNSPECIFIED
//! placeholder and contributes a TODO entry citing the file's full line
//! range. The builder is pure; it returns the card text, the section
//! presence flags scoring needs, and its own TODO list.

use crate::models::source::SourceFile;
use crate::models::Detection;
use crate::score::SectionPresence;
use crate::sections::{
    extract_section, CONSUMES_KEYWORDS, LIFECYCLE_KEYWORDS, PRODUCES_KEYWORDS, PURPOSE_KEYWORDS,
};
use crate::todo;

#[derive(Debug)]
/// Result of rendering one runbook card.
pub struct CardOutput {
    pub text: String,
    pub sections: SectionPresence,
    pub todos: Vec<String>,
}

fn entry_line(indent: &str, entry: &Detection) -> String {
    format!(
        "{}- {} (Source: {}) \"{}\"",
        indent, entry.name, entry.source, entry.snippet
    )
}

fn ensure_content(
    text: Option<String>,
    label: &str,
    full_range: &str,
    todos: &mut Vec<String>,
) -> (String, bool) {
    match text {
        Some(t) => (t, true),
        None => {
            todo::record(todos, &format!("{} missing", label), full_range);
            (
                format!("UNSPECIFIED\nTODO: Provide details ({})", full_range),
                false,
            )
        }
    }
}

/// Render the card for one runbook file.
pub fn build_runbook_card(fd: &SourceFile) -> CardOutput {
    let mut todos: Vec<String> = Vec::new();
    let full_range = fd.full_range();

    let purpose = extract_section(fd, PURPOSE_KEYWORDS).map(|s| s.text);
    let (purpose_value, has_purpose) = ensure_content(purpose, "Purpose", &full_range, &mut todos);

    let produces = extract_section(fd, PRODUCES_KEYWORDS).map(|s| s.text);
    let (produces_value, has_produces) =
        ensure_content(produces, "Produces (Artifacts)", &full_range, &mut todos);

    let consumes = extract_section(fd, CONSUMES_KEYWORDS).map(|s| s.text);
    let (consumes_value, has_consumes) =
        ensure_content(consumes, "Consumes (Prereqs)", &full_range, &mut todos);

    let mut card: Vec<String> = Vec::new();
    card.push("## Purpose".into());
    card.push(purpose_value);
    card.push(String::new());
    card.push("## Produces (Artifacts)".into());
    card.push(produces_value);
    card.push(String::new());
    card.push("## Consumes (Prereqs)".into());
    card.push(consumes_value);
    card.push(String::new());
    card.push("## Interfaces Touched".into());

    card.push("- REST endpoints".into());
    if fd.rest.is_empty() {
        todo::record(&mut todos, "REST endpoints unspecified", &full_range);
        card.push(format!(
            "  - UNSPECIFIED\n  - TODO: Document REST endpoints ({})",
            full_range
        ));
    } else {
        for entry in &fd.rest {
            card.push(entry_line("  ", entry));
        }
    }

    card.push("- IPC channels/events (if any)".into());
    if fd.ipc.is_empty() {
        todo::record(&mut todos, "IPC interfaces unspecified", &full_range);
        card.push(format!(
            "  - UNSPECIFIED\n  - TODO: Document IPC channels/events ({})",
            full_range
        ));
    } else {
        for entry in &fd.ipc {
            card.push(entry_line("  ", entry));
        }
    }

    card.push("- Filesystem paths/formats".into());
    if fd.files.is_empty() {
        todo::record(&mut todos, "Filesystem paths/formats unspecified", &full_range);
        card.push(format!(
            "  - UNSPECIFIED\n  - TODO: Document filesystem paths/formats ({})",
            full_range
        ));
    } else {
        for entry in &fd.files {
            card.push(entry_line("  ", entry));
        }
    }

    card.push("- Process lifecycle (if any)".into());
    match extract_section(fd, LIFECYCLE_KEYWORDS) {
        Some(section) => card.push(format!("  - {}", section.text).replace('\n', " ")),
        None => {
            todo::record(&mut todos, "Process lifecycle unspecified", &full_range);
            card.push(format!(
                "  - UNSPECIFIED\n  - TODO: Document process lifecycle ({})",
                full_range
            ));
        }
    }

    card.push(String::new());
    card.push("## Contracts Defined or Used".into());
    if fd.has_contracts() {
        for entry in &fd.rest {
            card.push(format!(
                "- REST {} (Source: {}) \"{}\"",
                entry.name, entry.source, entry.snippet
            ));
        }
        for entry in &fd.ipc {
            card.push(format!(
                "- IPC {} (Source: {}) \"{}\"",
                entry.name, entry.source, entry.snippet
            ));
        }
        for entry in &fd.schemas {
            card.push(format!(
                "- Schema {} (Source: {}) \"{}\"",
                entry.name, entry.source, entry.snippet
            ));
        }
        for entry in &fd.files {
            card.push(format!(
                "- File {} (Source: {}) \"{}\"",
                entry.name, entry.source, entry.snippet
            ));
        }
    } else {
        todo::record(&mut todos, "Contracts unspecified", &full_range);
        card.push(format!("UNSPECIFIED\nTODO: List contracts ({})", full_range));
    }

    card.push(String::new());
    card.push("## Invariants Relied On".into());
    if fd.invariants.is_empty() {
        todo::record(&mut todos, "Invariants unspecified", &full_range);
        card.push(format!("UNSPECIFIED\nTODO: Add invariants ({})", full_range));
    } else {
        for entry in &fd.invariants {
            card.push(entry_line("", entry));
        }
    }

    card.push(String::new());
    card.push("## Verification Gate (Commands + Expected Outputs)".into());
    if fd.verifications.is_empty() {
        todo::record(&mut todos, "Verification gate missing", &full_range);
        card.push(format!(
            "UNSPECIFIED\nTODO: Define verification gate ({})",
            full_range
        ));
    } else {
        for entry in &fd.verifications {
            card.push(entry_line("", entry));
        }
    }

    card.push(String::new());
    card.push("## Risks / Unknowns (TODOs)".into());
    if fd.risks.is_empty() {
        todo::record(&mut todos, "Risks unspecified", &full_range);
        card.push(format!("UNSPECIFIED\nTODO: Document risks ({})", full_range));
    } else {
        for entry in &fd.risks {
            card.push(entry_line("", entry));
        }
    }

    CardOutput {
        text: card.join("\n"),
        sections: SectionPresence {
            purpose: has_purpose,
            produces: has_produces,
            consumes: has_consumes,
        },
        todos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::parse_headings;
    use crate::scan::scan_file;

    fn runbook(lines: &[&str]) -> SourceFile {
        let mut fd = SourceFile {
            rel_path: "RUNBOOK_3_ingest.md".into(),
            is_runbook: true,
            runbook_number: Some(3),
            lines: lines.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        fd.headings = parse_headings(&fd.lines);
        scan_file(&mut fd);
        fd
    }

    #[test]
    fn test_bare_rest_runbook_card() {
        let fd = runbook(&["GET /cases/{id}"]);
        let card = build_runbook_card(&fd);
        assert!(card.text.contains("## Interfaces Touched"));
        assert!(card
            .text
            .contains("  - GET /cases/{id} (Source: RUNBOOK_3_ingest.md:L1-L1)"));
        assert!(card.text.contains("## Purpose\nUNSPECIFIED"));
        assert!(!card.sections.purpose);
        assert!(!card.sections.produces);
        assert!(!card.sections.consumes);
        // REST present, so the contracts block lists it instead of a TODO.
        assert!(card.text.contains("- REST GET /cases/{id}"));
        assert!(card
            .todos
            .contains(&"Purpose missing (RUNBOOK_3_ingest.md:L1-L1)".to_string()));
        assert!(card
            .todos
            .contains(&"Verification gate missing (RUNBOOK_3_ingest.md:L1-L1)".to_string()));
        assert!(!card.todos.iter().any(|t| t.starts_with("Contracts unspecified")));
    }

    #[test]
    fn test_sections_fill_card_and_flags() {
        let fd = runbook(&[
            "## Purpose",
            "Ingest filings.",
            "## Produces (Artifacts)",
            "normalized.json",
            "## Consumes (Prereqs)",
            "raw exports",
            "## Verification",
            "Run: pytest",
        ]);
        let card = build_runbook_card(&fd);
        assert!(card.sections.purpose);
        assert!(card.sections.produces);
        assert!(card.sections.consumes);
        assert!(card.text.contains("## Purpose\nIngest filings."));
        assert!(!card.todos.iter().any(|t| t.starts_with("Purpose missing")));
        assert!(!card
            .todos
            .iter()
            .any(|t| t.starts_with("Verification gate missing")));
    }

    #[test]
    fn test_lifecycle_newlines_flattened() {
        let fd = runbook(&["## Process Lifecycle", "starts warm", "stops cold"]);
        let card = build_runbook_card(&fd);
        assert!(card.text.contains("  - starts warm stops cold"));
    }

    #[test]
    fn test_empty_file_uses_l1_range() {
        let fd = runbook(&[]);
        let card = build_runbook_card(&fd);
        assert!(card
            .todos
            .contains(&"Purpose missing (RUNBOOK_3_ingest.md:L1-L1)".to_string()));
    }
}
