//! Report builders: the RYG scorecard, the open-TODO list, and the JSON
//! summary mirror.

use crate::models::source::SourceFile;
use crate::models::{AuditIssue, Detection, Grade};
use crate::score::{self, PassScores, PASS_LABELS};
use serde_json::{json, Value as Json};
use std::collections::HashMap;

const TOP_LIST_LIMIT: usize = 10;

fn scores_for(scores: &HashMap<String, PassScores>, rel_path: &str) -> PassScores {
    scores
        .get(rel_path)
        .copied()
        .unwrap_or(PassScores([Grade::Unspecified; 6]))
}

/// Render the RYG audit report. Returns the text and the blocking-fixes
/// list, which the JSON summary reuses verbatim.
pub fn build_ryg_report(
    runbook_files: &[&SourceFile],
    scores: &HashMap<String, PassScores>,
    missing_contracts: &[String],
    missing_gates: &[String],
    risks: &[Detection],
) -> (String, Vec<String>) {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# RYG Audit Report".into());
    lines.push(String::new());
    lines.push("## Summary".into());

    let mut header: Vec<&str> = vec!["Runbook"];
    header.extend(PASS_LABELS);
    header.push("Overall");
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("| {} |", vec!["---"; header.len()].join(" | ")));

    let mut blocking_fixes: Vec<String> = Vec::new();
    for fd in runbook_files {
        let pass_scores = scores_for(scores, &fd.rel_path);
        let overall = score::overall(&pass_scores);
        let mut row: Vec<String> = vec![fd.rel_path.clone()];
        for (label, grade) in pass_scores.iter() {
            row.push(grade.as_str().to_string());
            if grade == Grade::Red {
                blocking_fixes.push(format!(
                    "{} {} RED ({})",
                    fd.rel_path,
                    label,
                    fd.full_range()
                ));
            }
        }
        row.push(overall.as_str().to_string());
        lines.push(format!("| {} |", row.join(" | ")));
    }

    lines.push(String::new());
    lines.push("## Blocking Fixes".into());
    if blocking_fixes.is_empty() {
        lines.push("- None identified.".into());
    } else {
        for item in &blocking_fixes {
            lines.push(format!("- {}", item));
        }
    }

    lines.push(String::new());
    lines.push("## Top 10 missing contracts".into());
    if missing_contracts.is_empty() {
        lines.push("- None identified.".into());
    } else {
        for item in missing_contracts.iter().take(TOP_LIST_LIMIT) {
            lines.push(format!("- {}", item));
        }
    }

    lines.push(String::new());
    lines.push("## Top 10 missing verification gates".into());
    if missing_gates.is_empty() {
        lines.push("- None identified.".into());
    } else {
        for item in missing_gates.iter().take(TOP_LIST_LIMIT) {
            lines.push(format!("- {}", item));
        }
    }

    lines.push(String::new());
    lines.push("## Top 10 global risks".into());
    if risks.is_empty() {
        lines.push("- None identified.".into());
    } else {
        for entry in risks.iter().take(TOP_LIST_LIMIT) {
            lines.push(format!("- {} (Source: {})", entry.name, entry.source));
        }
    }

    (lines.join("\n"), blocking_fixes)
}

/// Render the deduplicated open-TODO list.
pub fn build_open_todos(todos: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Open TODOs".into());
    lines.push(String::new());
    if todos.is_empty() {
        lines.push("- None.".into());
    } else {
        for item in todos {
            lines.push(format!("- {}", item));
        }
    }
    lines.join("\n")
}

/// Compose the machine-readable summary mirroring the RYG report.
pub fn compose_audit_summary(
    runbook_files: &[&SourceFile],
    scores: &HashMap<String, PassScores>,
    blocking_fixes: &[String],
    missing_contracts: &[String],
    missing_gates: &[String],
    risks: &[Detection],
    todos: &[String],
    errors: &[AuditIssue],
) -> Json {
    let runbooks_summary: Vec<Json> = runbook_files
        .iter()
        .map(|fd| {
            let pass_scores = scores_for(scores, &fd.rel_path);
            let mut passes = serde_json::Map::new();
            for (label, grade) in pass_scores.iter() {
                passes.insert(label.to_string(), json!(grade.as_str()));
            }
            let name = std::path::Path::new(&fd.rel_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| fd.rel_path.clone());
            json!({
                "name": name,
                "path": fd.rel_path,
                "number": fd.runbook_number,
                "passes": passes,
                "overall": score::overall(&pass_scores).as_str(),
                "has_verification": !fd.verifications.is_empty(),
                "has_contracts": fd.has_contracts(),
                "has_invariants": !fd.invariants.is_empty(),
            })
        })
        .collect();

    let global_risks: Vec<Json> = risks
        .iter()
        .take(TOP_LIST_LIMIT)
        .enumerate()
        .map(|(idx, r)| {
            json!({
                "id": format!("R-{:03}", idx + 1),
                "description": r.name,
                "source": r.source,
                "snippet": r.snippet,
            })
        })
        .collect();

    json!({
        "runbooks": runbooks_summary,
        "blocking_fixes": blocking_fixes,
        "top_missing_contracts": missing_contracts.iter().take(TOP_LIST_LIMIT).collect::<Vec<_>>(),
        "top_missing_verification_gates": missing_gates.iter().take(TOP_LIST_LIMIT).collect::<Vec<_>>(),
        "global_risks": global_risks,
        "todos": todos,
        "errors": errors,
    })
}

/// Pretty-print the summary with 2-space indentation.
pub fn build_audit_summary_json(summary: &Json) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}
