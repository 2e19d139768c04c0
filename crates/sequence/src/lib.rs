//! Sequence suggestion engine.
//!
//! Learns which item users tend to open after another and recommends the
//! next one. All state is a plain value threaded through the calls:
//!
//! ```text
//!   consumed item ──► RecentEvents::observe ──► (from, to)?
//!                                                  │
//!                                                  ▼
//!   SequenceState ──► record_transition ──► SequenceState'
//!                                                  │
//!   Catalog + source ─────────────────────► suggest ──► [Suggestion]
//! ```
//!
//! Suggestions come in three tiers: observed transitions first, then items
//! sharing a tag with the source, then items from the source's group.

pub mod recent;
pub mod state;
pub mod suggest;

pub use recent::{DEFAULT_RECENT_CAPACITY, DEFAULT_WINDOW_SECS, RecentEvent, RecentEvents};
pub use state::{SequencePair, SequenceState, pair_key, record_transition};
pub use suggest::{DEFAULT_SUGGESTION_LIMIT, Provenance, Suggestion, suggest};
