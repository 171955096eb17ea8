//! Console rendering for audit runs.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the same
//! document written to `reports/audit_summary.json`.

use crate::models::Grade;
use crate::pipeline::AuditOutcome;
use owo_colors::OwoColorize;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn grade_tag(grade: Grade, color: bool) -> String {
    let tag = format!("⟦{}⟧", grade.as_str());
    if !color {
        return tag;
    }
    match grade {
        Grade::Red => tag.red().bold().to_string(),
        Grade::Yellow => tag.yellow().bold().to_string(),
        Grade::Green => tag.green().bold().to_string(),
        Grade::Unspecified => tag.bright_black().to_string(),
    }
}

fn grade_icon(grade: Grade, color: bool) -> String {
    let icon = match grade {
        Grade::Red => "✖",
        Grade::Yellow => "▲",
        Grade::Green => "●",
        Grade::Unspecified => "◆",
    };
    if !color {
        return icon.to_string();
    }
    match grade {
        Grade::Red => icon.red().to_string(),
        Grade::Yellow => icon.yellow().to_string(),
        Grade::Green => icon.green().to_string(),
        Grade::Unspecified => icon.bright_black().to_string(),
    }
}

/// Print the outcome of an audit run in the requested format.
pub fn print_audit(outcome: &AuditOutcome, output: &str) {
    match output {
        "json" => println!("{}", outcome.summary_json),
        _ => {
            let color = use_colors(output);
            for (rel, grade) in &outcome.runbook_grades {
                let file = if color {
                    rel.bold().to_string()
                } else {
                    rel.clone()
                };
                println!(
                    "{} {} {}",
                    grade_icon(*grade, color),
                    grade_tag(*grade, color),
                    file
                );
            }
            for issue in &outcome.errors {
                let tag = if color {
                    "⟦skipped⟧".yellow().bold().to_string()
                } else {
                    "⟦skipped⟧".to_string()
                };
                println!("▲ {} {} — {}", tag, issue.file, issue.message);
            }
            let (red, yellow, green) = grade_counts(outcome);
            let summary = format!(
                "— Summary — red={} yellow={} green={} runbooks={} files={} todos={}",
                red,
                yellow,
                green,
                outcome.runbook_grades.len(),
                outcome.files_scanned,
                outcome.todo_count
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn grade_counts(outcome: &AuditOutcome) -> (usize, usize, usize) {
    let count = |g: Grade| {
        outcome
            .runbook_grades
            .iter()
            .filter(|(_, grade)| *grade == g)
            .count()
    };
    (count(Grade::Red), count(Grade::Yellow), count(Grade::Green))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_counts() {
        let outcome = AuditOutcome {
            runbook_grades: vec![
                ("a.md".into(), Grade::Red),
                ("b.md".into(), Grade::Yellow),
                ("c.md".into(), Grade::Red),
            ],
            files_scanned: 3,
            todo_count: 5,
            errors: vec![],
            summary_json: "{}".into(),
        };
        assert_eq!(grade_counts(&outcome), (2, 1, 0));
    }

    #[test]
    fn test_plain_tags_without_color() {
        assert_eq!(grade_tag(Grade::Red, false), "⟦RED⟧");
        assert_eq!(grade_icon(Grade::Green, false), "●");
    }
}
