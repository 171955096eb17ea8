//! Cross-file registry builders.
//!
//! Each builder iterates every file's category lists in discovery order and
//! emits one fixed-template block per detection. Owner/validator/schema
//! sub-fields cannot be inferred from prose, so they render as UNSPECIFIED
//! and are logged as TODOs.

use crate::models::source::SourceFile;
use crate::models::Detection;
use crate::todo;

/// Contract Registry: REST, IPC, Schema, and File contracts.
pub fn build_contract_registry(all_files: &[SourceFile]) -> (String, Vec<String>) {
    let mut todos: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Contract Registry".into());
    lines.push(String::new());

    lines.push("## REST Contracts".into());
    if all_files.iter().any(|fd| !fd.rest.is_empty()) {
        for fd in all_files {
            for entry in &fd.rest {
                lines.push(format!("- {}", entry.name));
                lines.push(format!("  - Request schema: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Response schema: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Error shape: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Owner: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Source: {} \"{}\"", entry.source, entry.snippet));
                todo::record(
                    &mut todos,
                    &format!("Contract details missing for {}", entry.name),
                    &entry.source,
                );
            }
        }
    } else {
        lines.push("None found.".into());
    }

    lines.push(String::new());
    lines.push("## IPC Contracts".into());
    if all_files.iter().any(|fd| !fd.ipc.is_empty()) {
        for fd in all_files {
            for entry in &fd.ipc {
                lines.push(format!("- {}", entry.name));
                lines.push(format!("  - Payload schema: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Direction: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Owner: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Source: {} \"{}\"", entry.source, entry.snippet));
                todo::record(
                    &mut todos,
                    &format!("IPC contract incomplete for {}", entry.name),
                    &entry.source,
                );
            }
        }
    } else {
        lines.push("None found.".into());
    }

    lines.push(String::new());
    lines.push("## Schema Contracts".into());
    if all_files.iter().any(|fd| !fd.schemas.is_empty()) {
        for fd in all_files {
            for entry in &fd.schemas {
                lines.push(format!("- {}", entry.name));
                lines.push(format!("  - Fields: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Owner: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Source: {} \"{}\"", entry.source, entry.snippet));
                todo::record(
                    &mut todos,
                    &format!("Schema fields unspecified for {}", entry.name),
                    &entry.source,
                );
            }
        }
    } else {
        lines.push("None found.".into());
    }

    lines.push(String::new());
    lines.push("## File Contracts".into());
    if all_files.iter().any(|fd| !fd.files.is_empty()) {
        for fd in all_files {
            for entry in &fd.files {
                lines.push(format!("- {}", entry.name));
                lines.push(format!(
                    "  - Directory/naming rules: UNSPECIFIED (TODO {})",
                    entry.source
                ));
                lines.push(format!("  - Owner: UNSPECIFIED (TODO {})", entry.source));
                lines.push(format!("  - Source: {} \"{}\"", entry.source, entry.snippet));
                todo::record(
                    &mut todos,
                    &format!("File contract details unspecified for {}", entry.name),
                    &entry.source,
                );
            }
        }
    } else {
        lines.push("None found.".into());
    }

    (lines.join("\n"), todos)
}

/// Interface Atlas: a flat table of REST/IPC/File detections.
pub fn build_interface_atlas(all_files: &[SourceFile]) -> (String, Vec<String>) {
    let mut todos: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Interface Atlas".into());
    lines.push(String::new());
    lines.push(
        "| From | To | Interface Type (REST/IPC/FS/ProcessIO) | Contract Name | Owner | Validator | Source |"
            .into(),
    );
    lines.push("| --- | --- | --- | --- | --- | --- | --- |".into());
    let mut any_rows = false;
    for fd in all_files {
        for entry in &fd.rest {
            any_rows = true;
            todo::record(
                &mut todos,
                &format!("Owner/Validator unspecified for {}", entry.name),
                &entry.source,
            );
            lines.push(format!(
                "| UNSPECIFIED | UNSPECIFIED | REST | {} | UNSPECIFIED | UNSPECIFIED | {} |",
                entry.name, entry.source
            ));
        }
        for entry in &fd.ipc {
            any_rows = true;
            todo::record(
                &mut todos,
                &format!("Owner/Validator unspecified for IPC {}", entry.name),
                &entry.source,
            );
            lines.push(format!(
                "| UNSPECIFIED | UNSPECIFIED | IPC | {} | UNSPECIFIED | UNSPECIFIED | {} |",
                entry.name, entry.source
            ));
        }
        for entry in &fd.files {
            any_rows = true;
            todo::record(
                &mut todos,
                &format!("Owner/Validator unspecified for file contract {}", entry.name),
                &entry.source,
            );
            lines.push(format!(
                "| UNSPECIFIED | UNSPECIFIED | FS | {} | UNSPECIFIED | UNSPECIFIED | {} |",
                entry.name, entry.source
            ));
        }
    }
    if !any_rows {
        lines.push("| None | None | None | None | None | None | None |".into());
    }
    (lines.join("\n"), todos)
}

/// Invariant Catalog: numbered INV-NNN entries across all files.
pub fn build_invariant_catalog(all_files: &[SourceFile]) -> (String, Vec<Detection>) {
    let invariants: Vec<Detection> = all_files
        .iter()
        .flat_map(|fd| fd.invariants.iter().cloned())
        .collect();
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Invariant Catalog".into());
    lines.push(String::new());
    if invariants.is_empty() {
        lines.push("None found.".into());
    } else {
        for (idx, inv) in invariants.iter().enumerate() {
            lines.push(format!("INV-{:03}", idx + 1));
            lines.push(format!("- Statement: {}", inv.name));
            lines.push(format!("- Applies To: {}", inv.file));
            lines.push("- Enforcement point: UNSPECIFIED".into());
            lines.push("- Proof/Test: UNSPECIFIED".into());
            lines.push(format!("- Source: {} \"{}\"", inv.source, inv.snippet));
            lines.push(String::new());
        }
    }
    (lines.join("\n").trim_end().to_string(), invariants)
}

/// Verification Gate Index over runbooks, with the missing-gates list that
/// feeds scoring output.
pub fn build_verification_gate_index(
    runbook_files: &[&SourceFile],
) -> (String, Vec<String>, Vec<String>) {
    let mut todos: Vec<String> = Vec::new();
    let mut missing_gates: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Verification Gate Index".into());
    lines.push(String::new());
    for fd in runbook_files {
        lines.push(format!("## {}", fd.rel_path));
        if fd.verifications.is_empty() {
            lines.push("- MISSING VERIFICATION GATE (RED)".into());
            todo::record(&mut todos, "Verification gate missing", &fd.full_range());
            missing_gates.push(fd.rel_path.clone());
        } else {
            for entry in &fd.verifications {
                lines.push(format!("- Command: {}", entry.name));
                lines.push(format!(
                    "  - Expected outcome: UNSPECIFIED (TODO {})",
                    entry.source
                ));
                todo::record(
                    &mut todos,
                    &format!("Expected outcome unspecified for {}", entry.name),
                    &entry.source,
                );
            }
        }
        lines.push(String::new());
    }
    (
        lines.join("\n").trim_end().to_string(),
        missing_gates,
        todos,
    )
}

/// Risk Register: numbered R-NNN entries across all files.
pub fn build_risk_register(all_files: &[SourceFile]) -> (String, Vec<Detection>) {
    let risks: Vec<Detection> = all_files
        .iter()
        .flat_map(|fd| fd.risks.iter().cloned())
        .collect();
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Risk Register".into());
    lines.push(String::new());
    if risks.is_empty() {
        lines.push("None found.".into());
    } else {
        for (idx, risk) in risks.iter().enumerate() {
            lines.push(format!("R-{:03}", idx + 1));
            lines.push(format!("- Description: {}", risk.name));
            lines.push("- Trigger / failure mode: UNSPECIFIED".into());
            lines.push("- Impact: UNSPECIFIED".into());
            lines.push("- Mitigation: UNSPECIFIED".into());
            lines.push("- Verification: UNSPECIFIED".into());
            lines.push(format!("- Runbooks impacted: {}", risk.file));
            lines.push(format!("- Source: {} \"{}\"", risk.source, risk.snippet));
            lines.push(String::new());
        }
    }
    (lines.join("\n").trim_end().to_string(), risks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan_file;

    fn scanned(rel: &str, lines: &[&str], is_runbook: bool) -> SourceFile {
        let mut fd = SourceFile {
            rel_path: rel.into(),
            is_runbook,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        scan_file(&mut fd);
        fd
    }

    #[test]
    fn test_empty_registry_sections_render_none_found() {
        let files = vec![scanned("RUNBOOK_1.md", &["nothing to see"], true)];
        let (text, todos) = build_contract_registry(&files);
        assert_eq!(text.matches("None found.").count(), 4);
        assert!(todos.is_empty());
    }

    #[test]
    fn test_contract_registry_entry_and_todo() {
        let files = vec![scanned("RUNBOOK_1.md", &["POST /cases"], true)];
        let (text, todos) = build_contract_registry(&files);
        assert!(text.contains("## REST Contracts\n- POST /cases"));
        assert!(text.contains("  - Request schema: UNSPECIFIED (TODO RUNBOOK_1.md:L1-L1)"));
        assert_eq!(
            todos,
            vec!["Contract details missing for POST /cases (RUNBOOK_1.md:L1-L1)"]
        );
    }

    #[test]
    fn test_interface_atlas_placeholder_row_when_empty() {
        let files = vec![scanned("RUNBOOK_1.md", &["plain prose"], true)];
        let (text, todos) = build_interface_atlas(&files);
        assert!(text.contains("| None | None | None | None | None | None | None |"));
        assert!(todos.is_empty());
    }

    #[test]
    fn test_interface_atlas_rows_and_todos() {
        let files = vec![scanned("RUNBOOK_1.md", &["GET /a", "see data.csv"], true)];
        let (text, todos) = build_interface_atlas(&files);
        assert!(text.contains("| UNSPECIFIED | UNSPECIFIED | REST | GET /a |"));
        assert!(text.contains("| UNSPECIFIED | UNSPECIFIED | FS | data.csv |"));
        assert_eq!(todos.len(), 2);
    }

    #[test]
    fn test_invariant_catalog_numbering_across_files() {
        let files = vec![
            scanned("RUNBOOK_1.md", &["invariant: ids are stable"], true),
            scanned("README.md", &["another invariant holds"], false),
        ];
        let (text, invariants) = build_invariant_catalog(&files);
        assert_eq!(invariants.len(), 2);
        assert!(text.contains("INV-001"));
        assert!(text.contains("INV-002"));
        assert!(text.contains("- Applies To: README.md"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_gate_index_missing_and_present() {
        let with_gate = scanned("RUNBOOK_1.md", &["Run: pytest tests/"], true);
        let without = scanned("RUNBOOK_2.md", &["no gate here"], true);
        let runbooks: Vec<&SourceFile> = vec![&with_gate, &without];
        let (text, missing, todos) = build_verification_gate_index(&runbooks);
        assert!(text.contains("## RUNBOOK_1.md\n- Command: Run: pytest tests/"));
        assert!(text.contains("## RUNBOOK_2.md\n- MISSING VERIFICATION GATE (RED)"));
        assert_eq!(missing, vec!["RUNBOOK_2.md"]);
        assert!(todos
            .iter()
            .any(|t| t == "Verification gate missing (RUNBOOK_2.md:L1-L1)"));
    }

    #[test]
    fn test_risk_register_numbering() {
        let files = vec![scanned("RUNBOOK_1.md", &["a blocker", "HIGH RISK step"], true)];
        let (text, risks) = build_risk_register(&files);
        assert_eq!(risks.len(), 2);
        assert!(text.contains("R-001\n- Description: a blocker"));
        assert!(text.contains("R-002"));
    }
}
