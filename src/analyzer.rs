//! Keyword analysis of Go source text.
//!
//! Plain substring matching; a keyword inside a comment or string literal
//! counts the same as real usage.

use std::path::Path;

/// Labels used in a commit message before the rest are dropped.
pub const MAX_MESSAGE_FEATURES: usize = 3;

/// Message body used when no feature matched.
pub const FALLBACK_SUMMARY: &str = "code update";

/// A feature label and the substrings that signal it.
struct FeatureCheck {
    label: &'static str,
    needles: &'static [&'static str],
}

const fn check(label: &'static str, needles: &'static [&'static str]) -> FeatureCheck {
    FeatureCheck { label, needles }
}

/// Checklist, in the order labels are reported.
const CHECKS: &[FeatureCheck] = &[
    check("imports", &["import ("]),
    check("main package", &["package main"]),
    check("functions", &["func "]),
    check("types", &["struct {", "type "]),
    check("interface", &["interface {"]),
    check("goroutines", &["goroutine", "go func", "go "]),
    check("channels", &["chan ", "channel"]),
    check("defer", &["defer "]),
    check("fmt", &["\"fmt\""]),
    check("http", &["\"net/http\""]),
    check("json", &["\"encoding/json\""]),
    check("io", &["\"io\"", "\"io/"]),
    check("os", &["\"os\""]),
    check("sync", &["\"sync\""]),
    check("map", &["make(map", "map["]),
    check("slice", &["make([]", "[]"]),
    check("append", &["append("]),
    check("error handling", &["if err != nil"]),
];

/// Number of labels `analyze` can ever return.
pub fn checklist_len() -> usize {
    CHECKS.len()
}

/// Detect features in file text, in checklist order.
pub fn analyze(content: &str) -> Vec<&'static str> {
    CHECKS
        .iter()
        .filter(|check| check.needles.iter().any(|needle| content.contains(needle)))
        .map(|check| check.label)
        .collect()
}

/// Build the commit message for a file's current content.
///
/// `Update <stem>: <up to 3 labels or "code update"> (<n> lines)`
pub fn commit_message(path: &Path, content: &str) -> String {
    let features = analyze(content);
    let summary = if features.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        features
            .iter()
            .take(MAX_MESSAGE_FEATURES)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        "Update {}: {} ({} lines)",
        stem,
        summary,
        line_count(content)
    )
}

/// Count `\n`-separated segments; a trailing newline adds an empty one.
fn line_count(content: &str) -> usize {
    content.split('\n').count()
}
