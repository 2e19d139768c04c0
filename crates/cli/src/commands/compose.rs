//! `promptloom compose` and `promptloom tokens`.

use super::files::{CmdResult, find_item, load_catalog, load_values};
use crate::ItemArgs;
use promptloom_core::FieldValues;
use promptloom_template::{extract_tokens, presentable_tokens, render};
use std::path::Path;

pub fn run(args: &ItemArgs, values: Option<&Path>) -> CmdResult {
    let catalog = load_catalog(&args.catalog)?;
    let item = find_item(&catalog, args)?;
    let values = match values {
        Some(path) => load_values(path)?,
        None => FieldValues::new(),
    };
    println!("{}", render(item, &values));
    Ok(())
}

/// One token per line; tokens unfit for a form field are flagged.
pub fn tokens(args: &ItemArgs) -> CmdResult {
    let catalog = load_catalog(&args.catalog)?;
    let item = find_item(&catalog, args)?;
    let all = extract_tokens(item);
    let shown = presentable_tokens(&all);
    for token in &all {
        if shown.contains(token) {
            println!("{token}");
        } else {
            println!("{token}  (nested brackets, not shown as a field)");
        }
    }
    Ok(())
}
