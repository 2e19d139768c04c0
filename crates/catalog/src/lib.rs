//! Remote catalog merge engine.
//!
//! Reconciles a local [`Catalog`] with an externally fetched [`Snapshot`].
//! The merge is a pure function over two already-loaded values:
//!
//! - **Monotonic**: local items are never changed, removed or reordered;
//!   remote items are only ever appended.
//! - **Idempotent**: merging the same snapshot twice adds nothing the
//!   second time, because every merged title joins the identity set.
//! - **Fail-soft**: remote groups that resolve to no local group and
//!   items with blank or already-known titles are dropped, not reported as
//!   errors. [`MergeReport`] makes the drops observable.
//!
//! [`Catalog`]: promptloom_core::Catalog
//! [`Snapshot`]: promptloom_core::Snapshot

mod merge;
mod resolve;

pub use merge::{MergeReport, merge, merge_with_report, needs_refresh};
pub use resolve::{resolve_group, strip_ordinal_prefix};
