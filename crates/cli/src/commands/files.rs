//! JSON file plumbing shared by the commands.

use crate::ItemArgs;
use promptloom_core::{Catalog, FieldValues, Item};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn read_text(path: &Path) -> CmdResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()).into())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> CmdResult<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse {}: {e}", path.display()).into())
}

/// Like [`read_json`], but a missing file yields the default value.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> CmdResult<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No state file yet, starting empty");
        return Ok(T::default());
    }
    read_json(path)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> CmdResult {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json + "\n")
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    Ok(())
}

pub fn load_catalog(path: &Path) -> CmdResult<Catalog> {
    let text = read_text(path)?;
    Ok(Catalog::from_json(&text)?)
}

pub fn load_values(path: &Path) -> CmdResult<FieldValues> {
    read_json(path)
}

/// Resolve `--title`/`--group` against the catalog.
pub fn find_item<'a>(catalog: &'a Catalog, args: &ItemArgs) -> CmdResult<&'a Item> {
    catalog
        .find(&args.title, args.group.as_deref())
        .ok_or_else(|| match &args.group {
            Some(group) => format!("No item titled '{}' in group '{group}'", args.title).into(),
            None => format!("No item titled '{}'", args.title).into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptloom_sequence::SequenceState;

    fn args(title: &str, group: Option<&str>) -> ItemArgs {
        ItemArgs {
            catalog: "unused.json".into(),
            title: title.into(),
            group: group.map(Into::into),
        }
    }

    #[test]
    fn find_item_by_title_and_group() {
        let mut catalog = Catalog::new();
        catalog.push(Item::new("Intro", "Sales"));
        catalog.push(Item::new("Intro", "Marketing"));

        assert_eq!(find_item(&catalog, &args("intro", None)).unwrap().group, "Sales");
        assert_eq!(
            find_item(&catalog, &args("Intro", Some("marketing"))).unwrap().group,
            "Marketing"
        );
        let err = find_item(&catalog, &args("Outro", Some("Sales"))).unwrap_err();
        assert!(err.to_string().contains("'Outro' in group 'Sales'"));
    }

    #[test]
    fn missing_state_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state: SequenceState = read_json_or_default(&dir.path().join("state.json")).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn json_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut catalog = Catalog::new();
        catalog.push(Item::new("Intro", "Sales").with_tags(["email"]));
        write_json(&path, &catalog).unwrap();
        assert_eq!(load_catalog(&path).unwrap(), catalog);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_values(&path).unwrap_err();
        assert!(err.to_string().contains("values.json"));
    }
}
