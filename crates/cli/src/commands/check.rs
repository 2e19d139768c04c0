//! `promptloom check`: run the finalize guardrail.

use super::files::{CmdResult, find_item, load_catalog, load_values};
use crate::ItemArgs;
use promptloom_config::AppConfig;
use std::path::Path;

pub fn run(args: &ItemArgs, values: &Path) -> CmdResult {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&args.catalog)?;
    let item = find_item(&catalog, args)?;
    let values = load_values(values)?;

    let guardrail = config.guardrail();
    let verdict = guardrail.check(item, &values);

    if verdict.missing.is_empty() {
        println!("All placeholders filled.");
    } else {
        println!("Missing ({}):", verdict.missing.len());
        for token in &verdict.missing {
            println!("  [{token}]");
        }
    }
    if verdict.interrupt {
        println!(
            "Finalize would be interrupted ({} missing, threshold {}).",
            verdict.missing.len(),
            guardrail.threshold
        );
    } else {
        println!("Ready to finalize.");
    }
    Ok(())
}
