use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{save_records, KeyValueStore};
use crate::vault::Vault;

/// Remove records by id, batch-friendly. Unknown ids are skipped with an
/// info note (absence is a defined no-op, not a failure).
pub fn run<S: KeyValueStore>(
    store: &mut S,
    vault: &mut Vault,
    ids: &[String],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut purged = 0usize;

    for id in ids {
        if vault.remove(id) {
            purged += 1;
        } else {
            result.add_message(CmdMessage::info(format!("Not in vault: {}", id)));
        }
    }

    if purged > 0 {
        if save_records(store, vault.records()).is_err() {
            result.add_message(CmdMessage::warning(
                "Vault storage failed (likely quota reached).",
            ));
        }
        result.add_message(CmdMessage::success(format!("{} items purged.", purged)));
    }

    Ok(result)
}
