use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{KeyValueStore, KEY_API_KEY, KEY_GALLERY, KEY_PRESETS, KEY_SESSION};
use crate::vault::Vault;

/// Factory reset: clear every namespace and empty the in-memory vault.
/// This is the recovery action offered after an unrecoverable fault, so
/// it keeps going past individual remove failures.
pub fn run<S: KeyValueStore>(store: &mut S, vault: &mut Vault) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for key in [KEY_GALLERY, KEY_PRESETS, KEY_SESSION, KEY_API_KEY] {
        if store.remove(key).is_err() {
            result.add_message(CmdMessage::warning(format!("Could not clear {}", key)));
        }
    }
    *vault = Vault::new();

    result.add_message(CmdMessage::success(
        "Factory reset complete. All local state cleared.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AspectRatio, ImageSize, ResultRecord, SourceType};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn reset_clears_every_namespace_and_the_vault() {
        let mut store = InMemoryStore::new();
        store.set(KEY_GALLERY, "[]").unwrap();
        store.set(KEY_PRESETS, "[]").unwrap();
        store.set(KEY_SESSION, "active").unwrap();
        store.set(KEY_API_KEY, "secret").unwrap();

        let mut vault = Vault::new();
        vault.add(ResultRecord {
            id: "a".into(),
            url: String::new(),
            prompt: String::new(),
            aspect_ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            timestamp: chrono::Utc::now(),
            source_type: SourceType::Generated,
            tags: None,
        });

        run(&mut store, &mut vault).unwrap();

        for key in [KEY_GALLERY, KEY_PRESETS, KEY_SESSION, KEY_API_KEY] {
            assert_eq!(store.get(key).unwrap(), None);
        }
        assert!(vault.is_empty());
    }
}
