//! Bounded ring of recently consumed items.
//!
//! Two consecutive consumptions of different items within the window count
//! as a transition. The ring itself is kept for the caller to persist; only
//! its newest entry feeds the window check.

use chrono::{DateTime, Duration, Utc};
use promptloom_core::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Five minutes.
pub const DEFAULT_WINDOW_SECS: i64 = 300;
pub const DEFAULT_RECENT_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEvent {
    pub item: ItemKey,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEvents {
    capacity: usize,
    window_secs: i64,
    events: VecDeque<RecentEvent>,
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY, Duration::seconds(DEFAULT_WINDOW_SECS))
    }
}

impl RecentEvents {
    /// A zero capacity is raised to 1 so the previous event is always known.
    pub fn new(capacity: usize, window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            window_secs: window.num_seconds(),
            events: VecDeque::with_capacity(capacity),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Apply new limits to an existing ring, dropping the oldest events
    /// that no longer fit. Used when a persisted ring is reloaded under a
    /// different configuration.
    pub fn reconfigure(&mut self, capacity: usize, window: Duration) {
        self.capacity = capacity.max(1);
        self.window_secs = window.num_seconds();
        self.evict_to(self.capacity);
    }

    /// Keep at most `keep` events, newest last.
    fn evict_to(&mut self, keep: usize) {
        while self.events.len() > keep {
            self.events.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RecentEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&RecentEvent> {
        self.events.back()
    }

    /// Push a consumed item and return the transition it completes, if any.
    ///
    /// A transition needs a previous event for a different item strictly
    /// less than one window earlier. Events arriving out of order (before
    /// the previous one) never form a transition.
    pub fn observe(&mut self, item: ItemKey, at: DateTime<Utc>) -> Option<(ItemKey, ItemKey)> {
        let transition = self.events.back().and_then(|prev| {
            let gap = at - prev.at;
            (prev.item != item && gap >= Duration::zero() && gap < self.window())
                .then(|| (prev.item.clone(), item.clone()))
        });

        // A deserialized ring may carry any capacity and any number of events.
        self.evict_to(self.capacity.max(1) - 1);
        self.events.push_back(RecentEvent { item, at });
        transition
    }
}
