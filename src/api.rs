//! # API Facade
//!
//! `AuraApi` is the single entry point for every operation, generic over
//! the storage backend so tests run against `InMemoryStore` while the
//! CLI wires up `FileStore`. It dispatches to the command and workflow
//! layers, normalizes inputs, and returns structured results. No
//! terminal I/O happens below this line.
//!
//! The vault and auth gate are loaded from the store once at
//! construction and kept authoritative in memory afterwards;
//! persistence happens inside the commands as a side effect of each
//! mutation.

use crate::auth::AuthGate;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::{AuraError, Result};
use crate::gemini::{Attachment, GeminiClient, DEFAULT_VOICE};
use crate::history::EditHistory;
use crate::model::{ChatMessage, RecordPatch, SortOrder, StylePreset};
use crate::store::{load_records, KeyValueStore};
use crate::vault::Vault;
use crate::workflows;
use std::path::Path;

pub struct AuraApi<S: KeyValueStore> {
    store: S,
    vault: Vault,
    auth: AuthGate,
}

impl<S: KeyValueStore> AuraApi<S> {
    /// Load persisted state from the store. Corrupt payloads have already
    /// been healed to empty by the typed loaders.
    pub fn new(mut store: S) -> Self {
        let records = load_records(&mut store);
        let auth = AuthGate::load(&store);
        Self {
            store,
            vault: Vault::from_records(records),
            auth,
        }
    }

    // --- vault ---

    pub fn list_records(&self, filter: &str, sort: SortOrder) -> Result<CmdResult> {
        commands::list::run(&self.vault, filter, sort)
    }

    pub fn update_record(&mut self, id: &str, patch: RecordPatch) -> Result<CmdResult> {
        commands::update::run(&mut self.store, &mut self.vault, id, patch)
    }

    pub fn delete_records(&mut self, ids: &[String]) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &mut self.vault, ids)
    }

    pub fn export_records(&self, ids: &[String], out_dir: &Path) -> Result<CmdResult> {
        commands::export::run(&self.vault, ids, out_dir)
    }

    pub fn compare_record(&self, id: &str) -> Result<CmdResult> {
        commands::compare::run(&self.vault, id)
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    // --- presets ---

    pub fn list_presets(&mut self) -> Result<CmdResult> {
        commands::presets::list(&mut self.store)
    }

    pub fn add_preset(&mut self, name: &str, tags: &str) -> Result<CmdResult> {
        commands::presets::add(&mut self.store, name, tags)
    }

    pub fn remove_preset(&mut self, selector: &str) -> Result<CmdResult> {
        commands::presets::remove(&mut self.store, selector)
    }

    pub fn resolve_preset(&mut self, selector: &str) -> Result<Option<StylePreset>> {
        commands::presets::resolve(&mut self.store, selector)
    }

    // --- session & credential ---

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn login(&mut self) -> Result<CmdResult> {
        self.auth.login(&mut self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Session active. Welcome back."));
        Ok(result)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        self.auth.logout(&mut self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Session closed."));
        Ok(result)
    }

    pub fn set_api_key(&mut self, key: &str) -> Result<CmdResult> {
        self.auth.set_key(&mut self.store, key)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("API key stored."));
        Ok(result)
    }

    pub fn clear_api_key(&mut self) -> Result<CmdResult> {
        self.auth.clear_key(&mut self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("API key cleared."));
        Ok(result)
    }

    pub fn has_api_key(&mut self) -> bool {
        self.auth.api_key(&self.store).is_some()
    }

    /// The credential-failure transition: invoked by the caller when a
    /// workflow reports `GeminiError::CredentialRejected`.
    pub fn handle_credential_failure(&mut self) -> Result<CmdResult> {
        self.auth.reset(&mut self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::error(
            "API Key invalid or restricted. Re-authenticating...",
        ));
        Ok(result)
    }

    pub fn factory_reset(&mut self) -> Result<CmdResult> {
        let result = commands::reset::run(&mut self.store, &mut self.vault)?;
        self.auth = AuthGate::load(&self.store);
        Ok(result)
    }

    // --- workflows ---

    /// A fresh client per call so a just-set key takes effect immediately.
    fn client(&mut self) -> Result<GeminiClient> {
        let key = self
            .auth
            .api_key(&self.store)
            .ok_or_else(|| AuraError::Api("No API key configured. Run `auragen key set` or export GEMINI_API_KEY.".into()))?;
        Ok(GeminiClient::new(key))
    }

    pub async fn generate(
        &mut self,
        request: workflows::generate::GenerateRequest,
    ) -> Result<CmdResult> {
        let client = self.client()?;
        workflows::generate::run(&client, &mut self.store, &mut self.vault, request).await
    }

    pub async fn edit(
        &mut self,
        history: &mut EditHistory,
        request: workflows::edit::EditRequest,
    ) -> Result<CmdResult> {
        let client = self.client()?;
        workflows::edit::run(&client, &mut self.store, &mut self.vault, history, request).await
    }

    pub async fn chat(
        &mut self,
        text: &str,
        attachment: Option<&Attachment>,
        thinking: bool,
    ) -> Result<String> {
        let client = self.client()?;
        workflows::chat::run(&client, text, attachment, thinking).await
    }

    pub async fn chat_session(
        &mut self,
        transcript: &mut Vec<ChatMessage>,
        text: &str,
        attachment: Option<&Attachment>,
        thinking: bool,
    ) -> Result<String> {
        let client = self.client()?;
        workflows::chat::run_session(&client, transcript, text, attachment, thinking).await
    }

    pub async fn transcribe(&mut self, audio: &Attachment) -> Result<String> {
        let client = self.client()?;
        workflows::speech::transcribe(&client, audio).await
    }

    pub async fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<Vec<u8>> {
        let client = self.client()?;
        workflows::speech::speak(&client, text, voice.unwrap_or(DEFAULT_VOICE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AspectRatio, ImageSize, ResultRecord, SourceType};
    use crate::store::memory::InMemoryStore;
    use crate::store::{KEY_GALLERY, KEY_SESSION};

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
    fn construction_loads_persisted_records() {
        let mut store = InMemoryStore::new();
        crate::store::save_records(&mut store, &[record("a"), record("b")]).unwrap();

        let api = AuraApi::new(store);
        assert_eq!(api.vault().len(), 2);
        assert_eq!(api.vault().records()[0].id, "a");
    }

    #[test]
    fn construction_heals_a_corrupt_gallery() {
        let mut store = InMemoryStore::new();
        store.set(KEY_GALLERY, "{broken").unwrap();

        let api = AuraApi::new(store);
        assert!(api.vault().is_empty());
    }

    #[test]
    fn credential_failure_forces_logout() {
        let mut store = InMemoryStore::new();
        store.set(KEY_SESSION, "active").unwrap();
        let mut api = AuraApi::new(store);
        api.set_api_key("doomed").unwrap();
        assert!(api.is_authenticated());

        api.handle_credential_failure().unwrap();
        assert!(!api.is_authenticated());
    }

    #[test]
    fn login_logout_round_trip() {
        let mut api = AuraApi::new(InMemoryStore::new());
        assert!(!api.is_authenticated());
        api.login().unwrap();
        assert!(api.is_authenticated());
        api.logout().unwrap();
        assert!(!api.is_authenticated());
    }
}
