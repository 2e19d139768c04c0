//! Field value maps: user-supplied `name → value` pairs.
//!
//! Blank or whitespace-only values count as unset everywhere.

use std::collections::BTreeMap;

/// Placeholder / answer values keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// The trimmed value for `name`, or `None` when absent or blank.
pub fn filled<'a>(values: &'a FieldValues, name: &str) -> Option<&'a str> {
    values
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
