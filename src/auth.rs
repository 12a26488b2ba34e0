//! Session flag and credential resolution.
//!
//! Both used to live as ambient globals in earlier iterations; they are
//! now an explicit [`AuthGate`] object, loaded from the store at startup
//! and injected into whatever needs it. `reset` is the handler for the
//! credential-failure signal from the Gemini boundary: it clears the
//! cached and persisted key and invalidates the session, which routes the
//! next state check back to login.

use crate::error::Result;
use crate::store::{KeyValueStore, KEY_API_KEY, KEY_SESSION, SESSION_ACTIVE};

/// Environment fallback for the Gemini credential, checked last.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Default)]
pub struct AuthGate {
    cached_key: Option<String>,
    authenticated: bool,
}

impl AuthGate {
    /// Load session and credential state from the store. Read failures
    /// degrade to "logged out with no key" rather than propagating.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let authenticated = matches!(
            store.get(KEY_SESSION),
            Ok(Some(ref v)) if v == SESSION_ACTIVE
        );
        let cached_key = store.get(KEY_API_KEY).ok().flatten().filter(|k| !k.is_empty());
        Self {
            cached_key,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login<S: KeyValueStore>(&mut self, store: &mut S) -> Result<()> {
        store.set(KEY_SESSION, SESSION_ACTIVE)?;
        self.authenticated = true;
        Ok(())
    }

    pub fn logout<S: KeyValueStore>(&mut self, store: &mut S) -> Result<()> {
        store.remove(KEY_SESSION)?;
        self.authenticated = false;
        Ok(())
    }

    /// Resolve the credential: in-memory cache, then persisted key, then
    /// the environment. Returns `None` when no source has one.
    pub fn api_key<S: KeyValueStore>(&mut self, store: &S) -> Option<String> {
        if let Some(key) = &self.cached_key {
            return Some(key.clone());
        }
        if let Ok(Some(key)) = store.get(KEY_API_KEY) {
            if !key.is_empty() {
                self.cached_key = Some(key.clone());
                return Some(key);
            }
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => {
                self.cached_key = Some(key.clone());
                Some(key)
            }
            _ => None,
        }
    }

    pub fn set_key<S: KeyValueStore>(&mut self, store: &mut S, key: &str) -> Result<()> {
        store.set(KEY_API_KEY, key)?;
        self.cached_key = Some(key.to_string());
        Ok(())
    }

    pub fn clear_key<S: KeyValueStore>(&mut self, store: &mut S) -> Result<()> {
        store.remove(KEY_API_KEY)?;
        self.cached_key = None;
        Ok(())
    }

    /// Forced logout: the one cross-cutting error-driven transition.
    /// Invoked when the API reports the credential invalid.
    pub fn reset<S: KeyValueStore>(&mut self, store: &mut S) -> Result<()> {
        self.clear_key(store)?;
        self.logout(store)
    }
}
