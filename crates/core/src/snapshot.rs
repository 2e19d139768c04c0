//! Remote snapshot: an externally fetched, versioned partial catalog.
//!
//! Group labels arrive as free text and are not guaranteed to match local
//! labels exactly; every item field except the title is optional.
//!
//! Remote groups keep the order they have in the document, so merging a
//! snapshot appends items in the order its author wrote them.

use crate::item::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Remote group label → ordered items, in document order.
    #[serde(default, with = "ordered_modules")]
    pub modules: Vec<(String, Vec<PartialItem>)>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of items across all remote groups.
    pub fn item_count(&self) -> usize {
        self.modules.iter().map(|(_, items)| items.len()).sum()
    }

    /// Items under the first remote group labelled exactly `label`.
    pub fn module(&self, label: &str) -> Option<&[PartialItem]> {
        self.modules
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, items)| items.as_slice())
    }
}

/// A JSON object of `label → items` read and written as an ordered list.
mod ordered_modules {
    use super::PartialItem;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    type Modules = Vec<(String, Vec<PartialItem>)>;

    pub fn serialize<S: Serializer>(modules: &Modules, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(modules.len()))?;
        for (label, items) in modules {
            map.serialize_entry(label, items)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Modules, D::Error> {
        deserializer.deserialize_map(ModulesVisitor)
    }

    struct ModulesVisitor;

    impl<'de> Visitor<'de> for ModulesVisitor {
        type Value = Modules;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of group label to items")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Modules, A::Error> {
            let mut modules = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((label, items)) = access.next_entry::<String, Vec<PartialItem>>()? {
                modules.push((label, items));
            }
            Ok(modules)
        }
    }
}

/// An item as delivered by a snapshot: no group, no position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialItem {
    #[serde(default)]
    pub title: String,

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

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "riskNote")]
    pub risk_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "outputFormat")]
    pub output_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl PartialItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Materialize into a full item placed in `group` at `position`.
    pub fn into_item(self, group: &str, position: usize) -> Item {
        Item {
            title: self.title.trim().to_string(),
            group: group.to_string(),
            position,
            tags: self.tags,
            role: self.role,
            deliverable: self.deliverable,
            success_criteria: self.success_criteria,
            inputs: self.inputs,
            constraints: self.constraints,
            tools: self.tools,
            iteration: self.iteration,
            risk_note: self.risk_note,
            output_format: self.output_format,
            audience: self.audience,
        }
    }
}
