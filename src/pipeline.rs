//! Audit pipeline: discover, scan, build, write.
//!
//! Data flows one way: discovery → scan → section extraction → builders →
//! writes. Builders are pure; this module owns every filesystem write and
//! the central TODO merge/dedup.

use crate::config::Effective;
use crate::models::source::SourceFile;
use crate::models::{AuditIssue, Grade};
use crate::score::{self, PassScores};
use crate::{cards, discover, registries, report, scan, todo};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug)]
/// What a completed run hands to the console printer.
pub struct AuditOutcome {
    /// `(rel_path, overall grade)` per runbook, in discovery order.
    pub runbook_grades: Vec<(String, Grade)>,
    pub files_scanned: usize,
    pub todo_count: usize,
    pub errors: Vec<AuditIssue>,
    /// Pretty-printed `audit_summary.json` content (without the trailing
    /// newline added on write).
    pub summary_json: String,
}

/// Write `content` with trailing whitespace normalized to one newline.
fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", content.trim_end()))
}

fn ensure_dirs(out_dir: &Path) -> io::Result<()> {
    for sub in ["registries", "reports", "runbook_cards"] {
        fs::create_dir_all(out_dir.join(sub))?;
    }
    Ok(())
}

/// Run the full audit. Missing documentation never fails the run; only
/// output I/O errors propagate.
pub fn run_audit(eff: &Effective) -> io::Result<AuditOutcome> {
    ensure_dirs(&eff.out_dir)?;

    let (mut files, errors) = discover::discover_files(
        &eff.root,
        &eff.out_dir,
        &eff.runbook_patterns,
        &eff.additional_patterns,
    );
    scan::scan_all(&mut files);

    let mut todos: Vec<String> = Vec::new();
    let mut scores: HashMap<String, PassScores> = HashMap::new();
    let mut runbook_grades: Vec<(String, Grade)> = Vec::new();

    // Cards first: they establish the section presence flags scoring needs,
    // and their TODOs lead the merged list.
    for fd in files.iter().filter(|f| f.is_runbook) {
        let card = cards::build_runbook_card(fd);
        let id = fd
            .runbook_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        write_file(
            &eff.out_dir
                .join("runbook_cards")
                .join(format!("RUNBOOK_{}_CARD.md", id)),
            &card.text,
        )?;
        todos.extend(card.todos);
        scores.insert(fd.rel_path.clone(), score::compute_passes(fd, card.sections));
    }

    let registries_dir = eff.out_dir.join("registries");
    let (contract_registry, t) = registries::build_contract_registry(&files);
    write_file(&registries_dir.join("CONTRACT_REGISTRY.md"), &contract_registry)?;
    todos.extend(t);

    let (interface_atlas, t) = registries::build_interface_atlas(&files);
    write_file(&registries_dir.join("INTERFACE_ATLAS.md"), &interface_atlas)?;
    todos.extend(t);

    let (invariant_catalog, _invariants) = registries::build_invariant_catalog(&files);
    write_file(&registries_dir.join("INVARIANT_CATALOG.md"), &invariant_catalog)?;

    let runbook_files: Vec<&SourceFile> = files.iter().filter(|f| f.is_runbook).collect();
    let (gate_index, missing_gates, t) =
        registries::build_verification_gate_index(&runbook_files);
    write_file(&registries_dir.join("VERIFICATION_GATE_INDEX.md"), &gate_index)?;
    todos.extend(t);

    let (risk_register, risk_entries) = registries::build_risk_register(&files);
    write_file(&registries_dir.join("RISK_REGISTER.md"), &risk_register)?;

    // REST mentions in files that never reference a schema.
    let missing_contracts: Vec<String> = files
        .iter()
        .filter(|fd| fd.schemas.is_empty())
        .flat_map(|fd| {
            fd.rest
                .iter()
                .map(|e| format!("{} ({})", e.name, e.source))
        })
        .collect();

    let reports_dir = eff.out_dir.join("reports");
    let (ryg_report, blocking_fixes) = report::build_ryg_report(
        &runbook_files,
        &scores,
        &missing_contracts,
        &missing_gates,
        &risk_entries,
    );
    write_file(&reports_dir.join("RYG_AUDIT_REPORT.md"), &ryg_report)?;

    let unique_todos = todo::dedup(&todos);
    write_file(
        &reports_dir.join("OPEN_TODOS.md"),
        &report::build_open_todos(&unique_todos),
    )?;

    let summary = report::compose_audit_summary(
        &runbook_files,
        &scores,
        &blocking_fixes,
        &missing_contracts,
        &missing_gates,
        &risk_entries,
        &unique_todos,
        &errors,
    );
    let summary_json = report::build_audit_summary_json(&summary);
    write_file(&reports_dir.join("audit_summary.json"), &summary_json)?;

    for fd in &runbook_files {
        let overall = score::overall(
            &scores
                .get(&fd.rel_path)
                .copied()
                .unwrap_or(PassScores([Grade::Unspecified; 6])),
        );
        runbook_grades.push((fd.rel_path.clone(), overall));
    }

    Ok(AuditOutcome {
        runbook_grades,
        files_scanned: files.len(),
        todo_count: unique_todos.len(),
        errors,
        summary_json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_effective;
    use tempfile::tempdir;

    fn seed_tree(root: &Path) {
        fs::write(
            root.join("RUNBOOK_1_fetch.md"),
            "# Fetch\nGET /cases/{id}\n",
        )
        .unwrap();
        fs::write(
            root.join("RUNBOOK_2_verify.md"),
            "## Purpose\nCheck drift.\n## Consumes (Prereqs)\ncase exports\n## Produces (Artifacts)\nreport.json\n## Verification\nRun: pytest\n",
        )
        .unwrap();
        fs::write(root.join("README.md"), "See invariant notes and risk log.\n").unwrap();
    }

    #[test]
    fn test_end_to_end_bare_rest_runbook() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed_tree(root);

        let eff = resolve_effective(root.to_str(), None, None);
        let outcome = run_audit(&eff).unwrap();

        assert_eq!(outcome.files_scanned, 3);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.runbook_grades.len(), 2);
        // RUNBOOK_1 has a REST detection but no verification: RED.
        assert_eq!(outcome.runbook_grades[0].0, "RUNBOOK_1_fetch.md");
        assert_eq!(outcome.runbook_grades[0].1, Grade::Red);
        // RUNBOOK_2 has all sections and a gate: YELLOW (placeholder axes).
        assert_eq!(outcome.runbook_grades[1].1, Grade::Yellow);

        let card = fs::read_to_string(
            eff.out_dir.join("runbook_cards/RUNBOOK_1_CARD.md"),
        )
        .unwrap();
        assert!(card.contains("  - GET /cases/{id} (Source: RUNBOOK_1_fetch.md:L2-L2)"));
        assert!(card.contains("## Purpose\nUNSPECIFIED"));
        assert!(card.ends_with('\n'));
        assert!(!card.ends_with("\n\n"));

        let atlas = fs::read_to_string(
            eff.out_dir.join("registries/INTERFACE_ATLAS.md"),
        )
        .unwrap();
        assert!(atlas.contains("| UNSPECIFIED | UNSPECIFIED | REST | GET /cases/{id} |"));

        let ryg = fs::read_to_string(eff.out_dir.join("reports/RYG_AUDIT_REPORT.md")).unwrap();
        assert!(ryg.contains("RUNBOOK_1_fetch.md Pass 1 RED"));

        let summary: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(eff.out_dir.join("reports/audit_summary.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(summary["runbooks"][0]["overall"], "RED");
        assert_eq!(summary["runbooks"][1]["overall"], "YELLOW");
        // README.md is scanned into cross-file registries but not carded.
        assert!(!eff
            .out_dir
            .join("runbook_cards/RUNBOOK_UNKNOWN_CARD.md")
            .exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed_tree(root);
        let eff = resolve_effective(root.to_str(), None, None);

        run_audit(&eff).unwrap();
        let first = fs::read_to_string(eff.out_dir.join("reports/audit_summary.json")).unwrap();
        let first_todos = fs::read_to_string(eff.out_dir.join("reports/OPEN_TODOS.md")).unwrap();

        run_audit(&eff).unwrap();
        let second = fs::read_to_string(eff.out_dir.join("reports/audit_summary.json")).unwrap();
        let second_todos = fs::read_to_string(eff.out_dir.join("reports/OPEN_TODOS.md")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_todos, second_todos);
    }

    #[test]
    fn test_generated_outputs_are_not_rescanned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed_tree(root);
        let eff = resolve_effective(root.to_str(), None, None);

        let first = run_audit(&eff).unwrap();
        // The second run sees the generated cards on disk; the output dir
        // exclusion keeps the file count stable.
        let second = run_audit(&eff).unwrap();
        assert_eq!(first.files_scanned, second.files_scanned);
    }

    #[test]
    fn test_registries_none_found_on_quiet_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("RUNBOOK_1_quiet.md"), "nothing notable\n").unwrap();
        let eff = resolve_effective(root.to_str(), None, None);
        run_audit(&eff).unwrap();

        let registry =
            fs::read_to_string(eff.out_dir.join("registries/CONTRACT_REGISTRY.md")).unwrap();
        assert_eq!(registry.matches("None found.").count(), 4);
        let catalog =
            fs::read_to_string(eff.out_dir.join("registries/INVARIANT_CATALOG.md")).unwrap();
        assert!(catalog.contains("None found."));
    }
}
