use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{save_records, KeyValueStore};
use crate::model::ResultRecord;
use crate::vault::Vault;

/// Add a record to the vault and persist the membership change. A
/// duplicate id is the vault's defined no-op; persistence failure is
/// downgraded to a warning; the in-memory vault stays authoritative.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    vault: &mut Vault,
    record: ResultRecord,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let id = record.id.clone();

    if !vault.add(record) {
        result.add_message(CmdMessage::info(format!("Already vaulted: {}", id)));
        return Ok(result);
    }

    if save_records(store, vault.records()).is_err() {
        result.add_message(CmdMessage::warning(
            "Vault storage failed (likely quota reached).",
        ));
    }

    result.add_message(CmdMessage::success(format!("Saved to vault: {}", id)));
    if let Some(saved) = vault.get(&id) {
        result.affected_records.push(saved.clone());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{AspectRatio, ImageSize, SourceType};
    use crate::store::{load_records, memory::InMemoryStore};
    use crate::vault::VAULT_CAP;

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
    fn save_persists_the_membership_change() {
        let mut store = InMemoryStore::new();
        let mut vault = Vault::new();

        run(&mut store, &mut vault, record("a")).unwrap();

        let persisted = load_records(&mut store);
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, "a");
    }

    #[test]
    fn duplicate_save_reports_info_and_writes_nothing_new() {
        let mut store = InMemoryStore::new();
        let mut vault = Vault::new();
        run(&mut store, &mut vault, record("a")).unwrap();

        let result = run(&mut store, &mut vault, record("a")).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.affected_records.is_empty());
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn persisted_copy_reflects_eviction() {
        let mut store = InMemoryStore::new();
        let mut vault = Vault::new();
        for i in 0..=VAULT_CAP {
            run(&mut store, &mut vault, record(&format!("r{}", i))).unwrap();
        }

        let persisted = load_records(&mut store);
        assert_eq!(persisted.len(), VAULT_CAP);
        assert!(persisted.iter().all(|r| r.id != "r0"));
        assert_eq!(persisted[0].id, format!("r{}", VAULT_CAP));
    }
}
