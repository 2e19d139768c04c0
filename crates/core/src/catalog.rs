//! Catalog: the ordered collection of items across groups.
//!
//! Within a group, positions are contiguous and unique starting at 0.
//! Group order is the order in which a group's first item appears.

use crate::error::CatalogError;
use crate::item::{Item, ItemKey, normalize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from items, keeping their order as given.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Append an item at the end of its group, assigning the next position.
    pub fn push(&mut self, mut item: Item) {
        item.position = self.next_position(&item.group);
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Distinct group labels, in first-appearance order.
    pub fn groups(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|i| i.group.as_str())
            .filter(|g| seen.insert(*g))
            .collect()
    }

    /// Items of one group (exact label), sorted by position.
    pub fn group(&self, label: &str) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().filter(|i| i.group == label).collect();
        items.sort_by_key(|i| i.position);
        items
    }

    /// The position the next item appended to `label` would receive.
    pub fn next_position(&self, label: &str) -> usize {
        self.items
            .iter()
            .filter(|i| i.group == label)
            .map(|i| i.position + 1)
            .max()
            .unwrap_or(0)
    }

    /// Look up an item by identity key.
    pub fn get(&self, key: &ItemKey) -> Option<&Item> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Look up an item by title, optionally narrowed to a group.
    ///
    /// Without a group, the first item with a matching title wins.
    pub fn find(&self, title: &str, group: Option<&str>) -> Option<&Item> {
        let title = normalize(title);
        self.items.iter().find(|i| {
            normalize(&i.title) == title && group.is_none_or(|g| normalize(&i.group) == normalize(g))
        })
    }

    /// Every non-blank title in the catalog, normalized.
    pub fn title_set(&self) -> HashSet<String> {
        self.items
            .iter()
            .map(|i| normalize(&i.title))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Check the catalog invariants: non-blank titles, unique identities,
    /// and contiguous positions from 0 within every group.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut keys = HashSet::new();
        for item in &self.items {
            if item.title.trim().is_empty() {
                return Err(CatalogError::BlankTitle {
                    group: item.group.clone(),
                });
            }
            if !keys.insert(item.key()) {
                return Err(CatalogError::DuplicateItem {
                    title: item.title.clone(),
                    group: item.group.clone(),
                });
            }
        }

        for label in self.groups() {
            for (expected, item) in self.group(label).into_iter().enumerate() {
                if item.position != expected {
                    return Err(CatalogError::PositionGap {
                        group: label.to_string(),
                        expected,
                        found: item.position,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }
}
