//! Next-item recommendations.

use crate::state::{SequencePair, SequenceState};
use promptloom_core::{Catalog, Item, ItemKey, normalize};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Why an item was suggested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Users went from the source to this item `count` times, which is
    /// `percentage` of all recorded transitions out of the source.
    Sequence { count: u32, percentage: u32 },
    /// Shares at least one tag with the source.
    Tag,
    /// Lives in the source's group.
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub item: Item,
    pub provenance: Provenance,
}

/// Collects suggestions while enforcing the limit and exclusions.
struct Picker<'a> {
    source: &'a ItemKey,
    limit: usize,
    seen: HashSet<ItemKey>,
    out: Vec<Suggestion>,
}

impl Picker<'_> {
    fn full(&self) -> bool {
        self.out.len() >= self.limit
    }

    fn offer(&mut self, item: &Item, provenance: Provenance) {
        if self.full() {
            return;
        }
        let key = item.key();
        if &key == self.source || !self.seen.insert(key) {
            return;
        }
        self.out.push(Suggestion {
            item: item.clone(),
            provenance,
        });
    }
}

fn rounded_percentage(count: u32, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(count) * 100.0 / total as f64).round() as u32
}

/// Recommend up to `limit` items to open after `source`.
///
/// Observed transitions rank first (most frequent, then most recent, then
/// by key). Remaining slots go to items sharing a tag with the source, then
/// to items in the source's group, both in catalog order. The source itself
/// and targets missing from the catalog are never returned.
pub fn suggest(
    state: &SequenceState,
    catalog: &Catalog,
    source: &ItemKey,
    limit: usize,
) -> Vec<Suggestion> {
    let mut picker = Picker {
        source,
        limit,
        seen: HashSet::new(),
        out: Vec::new(),
    };

    let mut pairs: Vec<&SequencePair> = state.outgoing(source).collect();
    let total: u64 = pairs.iter().map(|p| u64::from(p.count)).sum();
    pairs.sort_by(|a, b| {
        let rank = |p: &SequencePair| (Reverse(p.count), Reverse(p.last_used));
        rank(*a).cmp(&rank(*b)).then_with(|| a.to.cmp(&b.to))
    });

    for pair in pairs {
        match catalog.get(&pair.to) {
            Some(item) => picker.offer(
                item,
                Provenance::Sequence {
                    count: pair.count,
                    percentage: rounded_percentage(pair.count, total),
                },
            ),
            None => debug!(to = %pair.to, "Skipping transition target missing from catalog"),
        }
    }

    if let Some(origin) = catalog.get(source) {
        for item in catalog.iter().filter(|i| i.shares_tag_with(origin)) {
            picker.offer(item, Provenance::Tag);
        }
        let group = normalize(&origin.group);
        for item in catalog.iter().filter(|i| normalize(&i.group) == group) {
            picker.offer(item, Provenance::Group);
        }
    } else {
        debug!(source = %source, "Source item not in catalog; only sequence suggestions apply");
    }

    picker.out
}
