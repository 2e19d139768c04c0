//! `promptloom merge`: fold a remote snapshot into a local catalog.

use super::files::{CmdResult, load_catalog, read_text, write_json};
use promptloom_catalog::{merge_with_report, needs_refresh};
use promptloom_core::Snapshot;
use std::path::Path;

pub fn run(
    catalog: &Path,
    snapshot: &Path,
    output: Option<&Path>,
    since: Option<&str>,
) -> CmdResult {
    let local = load_catalog(catalog)?;
    let remote = Snapshot::from_json(&read_text(snapshot)?)?;

    if !needs_refresh(since, &remote) {
        println!(
            "Snapshot {} already merged; nothing to do.",
            remote.version.as_deref().unwrap_or_default()
        );
        return Ok(());
    }

    let (merged, report) = merge_with_report(&local, &remote);

    match output {
        Some(path) => {
            write_json(path, &merged)?;
            println!("Wrote {} items to {}", merged.len(), path.display());
            println!("  Added:            {}", report.added.len());
            for title in &report.added {
                println!("    + {title}");
            }
            println!("  Duplicates:       {}", report.skipped_duplicates);
            println!("  Blank titles:     {}", report.skipped_blank);
            if !report.unresolved_groups.is_empty() {
                println!("  Unresolved groups: {}", report.unresolved_groups.join(", "));
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&merged)?),
    }
    Ok(())
}
