//! Snapshot merge.

use crate::resolve::resolve_group;
use promptloom_core::{Catalog, Snapshot, normalize};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a merge did, for hosts that want to observe fail-soft drops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Snapshot version that was merged, if it carried one.
    pub version: Option<String>,
    /// Titles appended, in append order.
    pub added: Vec<String>,
    /// Remote items skipped because their title already exists.
    pub skipped_duplicates: usize,
    /// Remote items skipped because their title is blank.
    pub skipped_blank: usize,
    /// Remote group labels that matched no local group.
    pub unresolved_groups: Vec<String>,
}

impl MergeReport {
    /// True when the merge left the catalog unchanged.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty()
    }
}

/// Merge `snapshot` into a copy of `local`.
pub fn merge(local: &Catalog, snapshot: &Snapshot) -> Catalog {
    merge_with_report(local, snapshot).0
}

/// Merge `snapshot` into a copy of `local` and report what happened.
pub fn merge_with_report(local: &Catalog, snapshot: &Snapshot) -> (Catalog, MergeReport) {
    let mut merged = local.clone();
    let mut report = MergeReport {
        version: snapshot.version.clone(),
        ..MergeReport::default()
    };

    // Resolution is against the local labels only; merging never creates groups.
    let groups = local.groups();
    let mut known = local.title_set();

    for (label, remote_items) in &snapshot.modules {
        let Some(group) = resolve_group(label, &groups) else {
            debug!(remote_group = %label, items = remote_items.len(), "Dropping unresolvable remote group");
            report.unresolved_groups.push(label.clone());
            continue;
        };

        for remote in remote_items {
            let title = normalize(&remote.title);
            if title.is_empty() {
                report.skipped_blank += 1;
                continue;
            }
            if !known.insert(title) {
                report.skipped_duplicates += 1;
                continue;
            }
            let position = merged.next_position(group);
            let item = remote.clone().into_item(group, position);
            report.added.push(item.title.clone());
            merged.items.push(item);
        }
    }

    if report.is_noop() {
        debug!(
            version = ?report.version,
            duplicates = report.skipped_duplicates,
            "Snapshot merge added nothing"
        );
    } else {
        info!(
            version = ?report.version,
            added = report.added.len(),
            duplicates = report.skipped_duplicates,
            unresolved = report.unresolved_groups.len(),
            "Merged remote snapshot"
        );
    }

    (merged, report)
}

/// Whether a snapshot should be merged given the version last merged.
///
/// Unversioned snapshots always qualify; merging is idempotent, so a
/// repeated merge is harmless.
pub fn needs_refresh(current_version: Option<&str>, snapshot: &Snapshot) -> bool {
    match snapshot.version.as_deref().map(str::trim) {
        Some(remote) if !remote.is_empty() => current_version.map(str::trim) != Some(remote),
        _ => true,
    }
}
