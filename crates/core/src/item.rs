//! Item domain type: a reusable structured content record.
//!
//! An item is identified by its (title, group) pair, compared
//! case-insensitively after trimming. The narrative fields are all optional;
//! the template engine substitutes documented defaults for absent ones.

use serde::{Deserialize, Serialize};

/// Trim and lowercase a label for identity comparisons.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Stable identity of an item: `"<group>/<title>"`, both normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(pub String);

impl ItemKey {
    pub fn new(group: &str, title: &str) -> Self {
        Self(format!("{}/{}", normalize(group), normalize(title)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display title; half of the item's identity.
    pub title: String,

    /// Topic label the item belongs to; the other half of its identity.
    pub group: String,

    /// Ordinal position within the group, starting at 0.
    #[serde(default)]
    pub position: usize,

    /// Free-form tags used for related-item suggestions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "successCriteria")]
    pub success_criteria: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,

    /// Guidance for the follow-up / refinement loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "riskNote")]
    pub risk_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "outputFormat")]
    pub output_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl Item {
    /// Create a bare item with only its identity set.
    pub fn new(title: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group: group.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The item's identity key.
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.group, &self.title)
    }

    /// Whether this item has the given (title, group) identity.
    pub fn is(&self, title: &str, group: &str) -> bool {
        normalize(&self.title) == normalize(title) && normalize(&self.group) == normalize(group)
    }

    /// Whether the two items share at least one tag (case-insensitive).
    pub fn shares_tag_with(&self, other: &Item) -> bool {
        self.tags.iter().any(|a| {
            let a = normalize(a);
            !a.is_empty() && other.tags.iter().any(|b| normalize(b) == a)
        })
    }

    /// The narrative fields that are present and non-blank, in render order.
    pub fn narrative(&self) -> impl Iterator<Item = &str> {
        [
            &self.role,
            &self.audience,
            &self.inputs,
            &self.constraints,
            &self.deliverable,
            &self.output_format,
            &self.success_criteria,
            &self.tools,
            &self.iteration,
            &self.risk_note,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .filter(|s| !s.trim().is_empty())
    }
}
