//! Placeholder token scanning and substitution.
//!
//! A token is the body of a single-bracket marker: `[market]`. Matching is
//! non-greedy: a marker ends at the first `]` and never crosses a line
//! break, so `[a] and [b]` yields two tokens rather than one.
//!
//! Nested markers are accepted as-is: `[outer [inner]]` yields the token
//! `outer [inner`. [`presentable_tokens`] drops such tokens for display.

use crate::compose::compose;
use promptloom_core::{FieldValues, Item, filled};
use regex_lite::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]").expect("token pattern is valid"));

/// Collect every non-blank token body in `text`, deduplicated, first-seen order.
pub fn scan_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    collect(text, &mut seen, &mut tokens);
    tokens
}

/// Tokens of an item: its raw fields first, then the composed text.
///
/// Raw fields are scanned one per line so a marker can never span two
/// fields; every token returned therefore appears literally as `[token]`
/// in [`compose`]'s output.
pub fn extract_tokens(item: &Item) -> Vec<String> {
    let raw = std::iter::once(item.title.as_str())
        .chain(item.narrative())
        .collect::<Vec<_>>()
        .join("\n");

    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    collect(&raw, &mut seen, &mut tokens);
    collect(&compose(item), &mut seen, &mut tokens);
    tokens
}

fn collect(text: &str, seen: &mut HashSet<String>, tokens: &mut Vec<String>) {
    for caps in TOKEN_RE.captures_iter(text) {
        let body = &caps[1];
        if body.trim().is_empty() {
            continue;
        }
        if seen.insert(body.to_string()) {
            tokens.push(body.to_string());
        }
    }
}

/// Replace each `[name]` whose trimmed name has a non-blank value.
///
/// Unfilled tokens are left in place so a partially filled prompt stays
/// visibly marked. With an empty map the output is byte-identical to the
/// input.
pub fn apply_values(text: &str, values: &FieldValues) -> String {
    TOKEN_RE
        .replace_all(text, |caps: &Captures<'_>| {
            match filled(values, caps[1].trim()) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Drop tokens that contain a nested `[`; presentation layers show only
/// the remainder as fillable fields.
pub fn presentable_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().filter(|t| !t.contains('[')).cloned().collect()
}
