//! TODO accumulation helpers.
//!
//! Builders return their own TODO lists; the pipeline merges them and
//! deduplicates once, by exact string, preserving first-seen order.

/// Append a TODO entry in the canonical `"{message} ({source})"` form.
pub fn record(todos: &mut Vec<String>, message: &str, source: &str) {
    todos.push(format!("{} ({})", message, source));
}

/// Exact-string dedup preserving first-occurrence order.
pub fn dedup(todos: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    for t in todos {
        if seen.insert(t.as_str()) {
            unique.push(t.clone());
        }
    }
    unique
}
