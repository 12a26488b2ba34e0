use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AuraError, Result};
use crate::gemini::payload::{data_url_mime, data_url_payload};
use crate::vault::Vault;
use base64::Engine;
use std::fs;
use std::path::Path;

/// Write vaulted renders to disk as `auragen-render-<id>.<ext>`. Only
/// data-URL records can be exported; remote URLs are reported and
/// skipped (no network here).
pub fn run(vault: &Vault, ids: &[String], out_dir: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        let Some(record) = vault.get(id) else {
            return Err(AuraError::RecordNotFound(id.clone()));
        };
        let Some(payload) = data_url_payload(&record.url) else {
            result.add_message(CmdMessage::info(format!(
                "Skipping {}: not stored inline",
                id
            )));
            continue;
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AuraError::Store(format!("Corrupt image data for {}: {}", id, e)))?;

        let ext = match data_url_mime(&record.url) {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        };
        if !out_dir.exists() {
            fs::create_dir_all(out_dir).map_err(AuraError::Io)?;
        }
        let path = out_dir.join(format!("auragen-render-{}.{}", id, ext));
        fs::write(&path, bytes).map_err(AuraError::Io)?;
        result.written_paths.push(path);
    }

    if !result.written_paths.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "Exporting {} items.",
            result.written_paths.len()
        )));
    }
    Ok(result)
}
