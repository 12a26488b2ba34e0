//! Business logic, one module per operation. No I/O assumptions: every
//! `run` takes the store and vault it operates on and returns a
//! [`CmdResult`] for the caller to render.

use crate::model::{ResultRecord, StylePreset};
use std::path::PathBuf;

pub mod compare;
pub mod delete;
pub mod export;
pub mod list;
pub mod presets;
pub mod reset;
pub mod save;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A comparison pair: the inferred generated source and the processed
/// record derived from it.
#[derive(Debug, Clone)]
pub struct ComparisonPair {
    pub original: ResultRecord,
    pub processed: ResultRecord,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<ResultRecord>,
    pub listed_records: Vec<ResultRecord>,
    pub presets: Vec<StylePreset>,
    pub written_paths: Vec<PathBuf>,
    pub comparison: Option<ComparisonPair>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<ResultRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_presets(mut self, presets: Vec<StylePreset>) -> Self {
        self.presets = presets;
        self
    }
}
