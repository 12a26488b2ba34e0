//! # AuraGen Architecture
//!
//! AuraGen is a **UI-agnostic creative-studio library** with a CLI client.
//! All the heavy lifting (image synthesis, editing/outpainting, speech,
//! chat inference) happens on the far side of the Gemini API; the local
//! code is state management, request assembly, and a persisted gallery.
//!
//! ## Layers
//!
//! ```text
//! CLI (cli/, wired by main.rs)
//!   the only place that knows about stdout/stderr/exit codes
//!        │
//! API facade (api.rs)
//!   AuraApi<S: KeyValueStore>: dispatch, structured Result types
//!        │
//! Commands (commands/*.rs) + Workflows (workflows/*.rs)
//!   pure business logic; workflows add the one async hop to Gemini
//!        │
//! Core state (vault.rs, history.rs, auth.rs)
//!   bounded gallery, undo/redo history, session & credential gate
//!        │
//! Storage (store/)
//!   KeyValueStore trait; FileStore (production), InMemoryStore (tests)
//! ```
//!
//! ## Key invariants
//!
//! - The vault never holds more than 15 records or two records with the
//!   same id; eviction follows insertion position, not timestamp.
//! - Persistence is best-effort: reads self-heal corrupt payloads to
//!   empty (clearing the key), writes downgrade failures to warnings and
//!   leave the in-memory state authoritative.
//! - The edit history is a linear branch-discard model: committing while
//!   behind the tail erases the redo branch.
//! - A Gemini failure never mutates vault or history; the single
//!   cross-cutting transition is `CredentialRejected`, which resets the
//!   auth gate (credential cleared, session invalidated).
//!
//! ## Module Overview
//!
//! - [`api`]: the facade and entry point for all operations
//! - [`commands`]: synchronous business logic per operation
//! - [`workflows`]: async Gemini flows ending in a vault commit
//! - [`vault`]: the bounded persisted collection
//! - [`history`]: undo/redo over editor snapshots
//! - [`auth`]: session flag and credential resolution
//! - [`gemini`]: wire payloads and the HTTP client
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: core data types
//! - [`error`]: error types
//! - `cli`: argument parsing and terminal output for the binary

pub mod api;
pub mod auth;
pub mod commands;
pub mod error;
pub mod gemini;
pub mod history;
pub mod model;
pub mod store;
pub mod vault;
pub mod workflows;
