//! Transition pair state.

use chrono::{DateTime, Utc};
use promptloom_core::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One observed ordered transition between two items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePair {
    pub from: ItemKey,
    pub to: ItemKey,
    pub count: u32,
    pub last_used: DateTime<Utc>,
}

/// Map key for a pair: `"<from>-><to>"`.
pub fn pair_key(from: &ItemKey, to: &ItemKey) -> String {
    format!("{from}->{to}")
}

/// Every observed transition, keyed by [`pair_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceState {
    pub pairs: BTreeMap<String, SequencePair>,
}

impl SequenceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> promptloom_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> promptloom_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, from: &ItemKey, to: &ItemKey) -> Option<&SequencePair> {
        self.pairs.get(&pair_key(from, to))
    }

    /// Pairs leaving `from`, in key order.
    pub fn outgoing<'a>(&'a self, from: &'a ItemKey) -> impl Iterator<Item = &'a SequencePair> {
        self.pairs.values().filter(move |p| &p.from == from)
    }

    /// Record `from → to` in place. Self-transitions are ignored.
    pub fn record(&mut self, from: &ItemKey, to: &ItemKey, at: DateTime<Utc>) {
        if from == to {
            debug!(item = %from, "Ignoring self-transition");
            return;
        }
        let pair = self
            .pairs
            .entry(pair_key(from, to))
            .and_modify(|p| {
                p.count = p.count.saturating_add(1);
                p.last_used = at;
            })
            .or_insert_with(|| SequencePair {
                from: from.clone(),
                to: to.clone(),
                count: 1,
                last_used: at,
            });
        debug!(from = %from, to = %to, count = pair.count, "Recorded transition");
    }
}

/// Record `from → to` and hand the state back.
pub fn record_transition(
    mut state: SequenceState,
    from: &ItemKey,
    to: &ItemKey,
    at: DateTime<Utc>,
) -> SequenceState {
    state.record(from, to, at);
    state
}
