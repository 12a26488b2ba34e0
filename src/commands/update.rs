use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AuraError, Result};
use crate::model::RecordPatch;
use crate::store::{save_records, KeyValueStore};
use crate::vault::Vault;

/// Merge a patch into a vaulted record. Tag edits change metadata, not
/// membership, but the persisted copy is refreshed all the same so a
/// reload sees them.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    vault: &mut Vault,
    id: &str,
    patch: RecordPatch,
) -> Result<CmdResult> {
    if !vault.update(id, patch) {
        return Err(AuraError::RecordNotFound(id.to_string()));
    }

    let mut result = CmdResult::default();
    if save_records(store, vault.records()).is_err() {
        result.add_message(CmdMessage::warning(
            "Vault storage failed (likely quota reached).",
        ));
    }
    result.add_message(CmdMessage::success(format!("Record updated: {}", id)));
    if let Some(updated) = vault.get(id) {
        result.affected_records.push(updated.clone());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AspectRatio, ImageSize, ResultRecord, SourceType};
    use crate::store::{load_records, memory::InMemoryStore};

    fn record(id: &str) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            url: String::new(),
            prompt: "p".to_string(),
            aspect_ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            timestamp: chrono::Utc::now(),
            source_type: SourceType::Generated,
            tags: None,
        }
    }

    #[test]
    fn tags_merge_and_persist() {
        let mut store = InMemoryStore::new();
        let mut vault = Vault::new();
        vault.add(record("a"));

        let patch = RecordPatch {
            tags: Some(vec!["hero".into()]),
            ..Default::default()
        };
        let result = run(&mut store, &mut vault, "a", patch).unwrap();
        assert_eq!(result.affected_records[0].tags.as_deref(), Some(&["hero".to_string()][..]));

        let persisted = load_records(&mut store);
        assert_eq!(persisted[0].tags.as_deref(), Some(&["hero".to_string()][..]));
    }

    #[test]
    fn unknown_id_is_an_error_at_this_layer() {
        let mut store = InMemoryStore::new();
        let mut vault = Vault::new();
        let err = run(&mut store, &mut vault, "ghost", RecordPatch::default()).unwrap_err();
        assert!(matches!(err, AuraError::RecordNotFound(_)));
    }
}
