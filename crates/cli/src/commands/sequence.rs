//! `promptloom record`, `open` and `suggest`.

use super::files::{
    CmdResult, find_item, load_catalog, read_json, read_json_or_default, write_json,
};
use crate::ItemArgs;
use chrono::{DateTime, Utc};
use promptloom_config::AppConfig;
use promptloom_core::ItemKey;
use promptloom_sequence::{Provenance, RecentEvents, SequenceState, Suggestion, record_transition};
use std::path::Path;

pub fn record(state_path: &Path, from: &str, to: &str, at: DateTime<Utc>) -> CmdResult {
    let state: SequenceState = read_json_or_default(state_path)?;
    let (from, to) = (parse_key(from)?, parse_key(to)?);
    let state = record_transition(state, &from, &to, at);
    write_json(state_path, &state)?;

    match state.get(&from, &to) {
        Some(pair) => println!("{from} -> {to}: {} time(s)", pair.count),
        None => println!("Ignored self-transition on {from}"),
    }
    Ok(())
}

pub fn open(args: &ItemArgs, state_path: &Path, recent_path: &Path, at: DateTime<Utc>) -> CmdResult {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&args.catalog)?;
    let item = find_item(&catalog, args)?;
    let key = item.key();

    let mut recent = load_recent(recent_path, &config)?;
    let mut state: SequenceState = read_json_or_default(state_path)?;

    if let Some((from, to)) = recent.observe(key.clone(), at) {
        state = record_transition(state, &from, &to, at);
        write_json(state_path, &state)?;
        println!("Recorded {from} -> {to}");
    }
    write_json(recent_path, &recent)?;

    let suggestions = promptloom_sequence::suggest(
        &state,
        &catalog,
        &key,
        config.sequence.suggestion_limit,
    );
    print_suggestions(&suggestions);
    Ok(())
}

pub fn suggest(args: &ItemArgs, state_path: &Path, limit: Option<usize>) -> CmdResult {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&args.catalog)?;
    let item = find_item(&catalog, args)?;
    let state: SequenceState = read_json_or_default(state_path)?;

    let limit = limit.unwrap_or(config.sequence.suggestion_limit);
    let suggestions = promptloom_sequence::suggest(&state, &catalog, &item.key(), limit);
    print_suggestions(&suggestions);
    Ok(())
}

/// A stored ring takes the configured capacity and window, not its own.
fn load_recent(path: &Path, config: &AppConfig) -> CmdResult<RecentEvents> {
    if !path.exists() {
        return Ok(config.recent_events());
    }
    let mut recent: RecentEvents = read_json(path)?;
    recent.reconfigure(
        config.sequence.recent_capacity,
        chrono::Duration::seconds(config.sequence.window_secs as i64),
    );
    Ok(recent)
}

/// Keys are `group/title`, split at the last `/`, so group labels may
/// contain slashes and titles may not. Both halves are normalized.
fn parse_key(raw: &str) -> CmdResult<ItemKey> {
    match raw.rsplit_once('/') {
        Some((group, title)) if !group.trim().is_empty() && !title.trim().is_empty() => {
            Ok(ItemKey::new(group, title))
        }
        _ => Err(format!("Item key must look like 'group/title', got '{raw}'").into()),
    }
}

fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No suggestions.");
        return;
    }
    println!("Up next:");
    for (i, s) in suggestions.iter().enumerate() {
        let why = match &s.provenance {
            Provenance::Sequence { count, percentage } => {
                format!("{percentage}% of next picks ({count}x)")
            }
            Provenance::Tag => "shares a tag".to_string(),
            Provenance::Group => format!("also in {}", s.item.group),
        };
        println!("  {}. {} [{}] — {why}", i + 1, s.item.title, s.item.group);
    }
}
