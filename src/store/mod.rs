//! # Storage Layer
//!
//! A small key-value abstraction standing in for the browser's local
//! storage: one string value per logical key. The [`KeyValueStore`] trait
//! keeps the rest of the library decoupled from persistence so tests run
//! against [`memory::InMemoryStore`] while production uses
//! [`fs::FileStore`] (one `<key>.json` file per key under the data dir).
//!
//! Namespaces:
//! - `gallery`: JSON array of vaulted records, capped at 15
//! - `custom_presets`: JSON array of user-defined style presets
//! - `session`: the literal value `"active"` when logged in
//! - `api_key`: the persisted Gemini credential
//!
//! The typed helpers below own the two persistence contracts the vault
//! relies on:
//! - reads are self-healing: malformed JSON is treated as absent and the
//!   corrupt key is cleared, never surfaced as an error
//! - writes are best-effort: a failed write leaves the in-memory state
//!   authoritative and the error flows back for the caller to downgrade
//!   to a warning

use crate::error::Result;
use crate::model::{ResultRecord, StylePreset};
use crate::vault::VAULT_CAP;

pub mod fs;
pub mod memory;

pub const KEY_GALLERY: &str = "gallery";
pub const KEY_PRESETS: &str = "custom_presets";
pub const KEY_SESSION: &str = "session";
pub const KEY_API_KEY: &str = "api_key";

pub const SESSION_ACTIVE: &str = "active";

/// Abstract interface over the local store. One string value per key;
/// `get` of an absent key is `Ok(None)`, `remove` of an absent key is a
/// successful no-op.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Load the persisted gallery. Happens once at startup; a corrupt payload
/// resets the key to empty rather than propagating.
pub fn load_records<S: KeyValueStore>(store: &mut S) -> Vec<ResultRecord> {
    load_array(store, KEY_GALLERY)
}

/// Persist the gallery after a membership change. Only the first
/// [`VAULT_CAP`] records are written.
pub fn save_records<S: KeyValueStore>(store: &mut S, records: &[ResultRecord]) -> Result<()> {
    let capped = &records[..records.len().min(VAULT_CAP)];
    let payload = serde_json::to_string(capped)?;
    store.set(KEY_GALLERY, &payload)
}

pub fn load_presets<S: KeyValueStore>(store: &mut S) -> Vec<StylePreset> {
    load_array(store, KEY_PRESETS)
}

pub fn save_presets<S: KeyValueStore>(store: &mut S, presets: &[StylePreset]) -> Result<()> {
    let payload = serde_json::to_string(presets)?;
    store.set(KEY_PRESETS, &payload)
}

fn load_array<S, T>(store: &mut S, key: &str) -> Vec<T>
where
    S: KeyValueStore,
    T: serde::de::DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(_) => {
            // Corrupt payload: clear it so the next session starts clean.
            let _ = store.remove(key);
            Vec::new()
        }
    }
}
