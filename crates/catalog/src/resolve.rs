//! Remote → local group label resolution.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Leading ordinal prefix such as `Module 3 — `, `Part 2: ` or `Unit 10 - `.
static ORDINAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:module|part|unit|chapter|section)\s+\d+\s*[—–:\-]\s*")
        .expect("ordinal prefix pattern is valid")
});

/// Remove a leading ordinal prefix, if any, and trim the remainder.
pub fn strip_ordinal_prefix(label: &str) -> &str {
    match ORDINAL_PREFIX.find(label) {
        Some(m) => label[m.end()..].trim(),
        None => label.trim(),
    }
}

/// Find the local group a remote label refers to.
///
/// An exact label match wins; otherwise the first local label whose
/// prefix-stripped remainder equals the remote label case-insensitively.
pub fn resolve_group<'a>(remote: &str, local_groups: &[&'a str]) -> Option<&'a str> {
    if let Some(exact) = local_groups.iter().find(|g| **g == remote) {
        return Some(*exact);
    }
    let wanted = remote.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    local_groups
        .iter()
        .find(|g| strip_ordinal_prefix(g).to_lowercase() == wanted)
        .copied()
}
