//! Async flows that call Gemini and end in a synchronous vault commit.
//!
//! These are the only suspension points in the program. Overlapping
//! invocations are not serialized: each completion performs its own
//! commit, so arrival order may differ from request order. A failed call
//! abandons the operation before anything is committed, which is what
//! keeps vault and history state clean on every error path.

pub mod chat;
pub mod edit;
pub mod generate;
pub mod speech;
