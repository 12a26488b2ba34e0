use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AuraError, Result};
use crate::model::{builtin_presets, StylePreset};
use crate::store::{load_presets, save_presets, KeyValueStore};

/// Built-ins followed by the persisted custom presets.
pub fn list<S: KeyValueStore>(store: &mut S) -> Result<CmdResult> {
    let mut all = builtin_presets();
    all.extend(load_presets(store));
    Ok(CmdResult::default().with_presets(all))
}

pub fn add<S: KeyValueStore>(store: &mut S, name: &str, tags: &str) -> Result<CmdResult> {
    let name = name.trim();
    let tags = tags.trim();
    if name.is_empty() || tags.is_empty() {
        return Err(AuraError::Api("Preset name and tags cannot be empty".into()));
    }

    let mut custom = load_presets(store);
    let preset = StylePreset::custom(name, tags);
    custom.push(preset.clone());

    let mut result = CmdResult::default();
    if save_presets(store, &custom).is_err() {
        result.add_message(CmdMessage::warning("Preset storage failed."));
    }
    result.add_message(CmdMessage::success("Custom style archived."));
    result.presets.push(preset);
    Ok(result)
}

/// Remove a custom preset by id or name. Built-ins stay.
pub fn remove<S: KeyValueStore>(store: &mut S, selector: &str) -> Result<CmdResult> {
    let mut custom = load_presets(store);
    let before = custom.len();
    custom.retain(|p| p.id != selector && p.name != selector);

    let mut result = CmdResult::default();
    if custom.len() == before {
        if builtin_presets().iter().any(|p| p.id == selector || p.name == selector) {
            return Err(AuraError::Api("Built-in styles cannot be removed".into()));
        }
        result.add_message(CmdMessage::info(format!("No such style: {}", selector)));
        return Ok(result);
    }

    if save_presets(store, &custom).is_err() {
        result.add_message(CmdMessage::warning("Preset storage failed."));
    }
    result.add_message(CmdMessage::success("Style removed."));
    Ok(result)
}

/// Resolve a preset (builtin or custom) to its prompt tags.
pub fn resolve<S: KeyValueStore>(store: &mut S, selector: &str) -> Result<Option<StylePreset>> {
    let mut all = builtin_presets();
    all.extend(load_presets(store));
    Ok(all
        .into_iter()
        .find(|p| p.id == selector || p.name.eq_ignore_ascii_case(selector)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn list_starts_with_the_six_builtins() {
        let mut store = InMemoryStore::new();
        let result = list(&mut store).unwrap();
        assert_eq!(result.presets.len(), 6);
    }

    #[test]
    fn added_preset_survives_reload() {
        let mut store = InMemoryStore::new();
        add(&mut store, "Noir", "film noir, hard shadows").unwrap();

        let result = list(&mut store).unwrap();
        assert_eq!(result.presets.len(), 7);
        let added = result.presets.last().unwrap();
        assert!(added.is_custom);
        assert_eq!(added.name, "Noir");
    }

    #[test]
    fn remove_by_name_only_touches_custom() {
        let mut store = InMemoryStore::new();
        add(&mut store, "Noir", "film noir").unwrap();

        remove(&mut store, "Noir").unwrap();
        assert_eq!(list(&mut store).unwrap().presets.len(), 6);

        assert!(remove(&mut store, "Anime").is_err());
    }

    #[test]
    fn resolve_matches_builtin_case_insensitively() {
        let mut store = InMemoryStore::new();
        let preset = resolve(&mut store, "cyberpunk").unwrap().unwrap();
        assert!(preset.tags.contains("neon"));
        assert!(resolve(&mut store, "nope").unwrap().is_none());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut store = InMemoryStore::new();
        assert!(add(&mut store, " ", "tags").is_err());
        assert!(add(&mut store, "name", "").is_err());
    }
}
