//! The vault: a bounded, most-recent-first collection of saved results.
//!
//! The cap is enforced at insertion time and eviction follows insertion
//! position, not the `timestamp` field. The two orderings can diverge when
//! records are inserted out of timestamp order (e.g. a reference image
//! vaulted after the render it seeded), and callers must not conflate
//! them: `list` sorts a copy by timestamp, `add` evicts by position.

use crate::model::{RecordPatch, ResultRecord, SortOrder, SourceType};

/// Maximum number of records kept, oldest insertion evicted first.
pub const VAULT_CAP: usize = 15;

#[derive(Debug, Default)]
pub struct Vault {
    records: Vec<ResultRecord>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        let mut vault = Self::new();
        // Re-insert back-to-front so the stored front-first order survives
        // the cap and the dedupe check.
        for record in records.into_iter().rev() {
            vault.add(record);
        }
        vault
    }

    /// Insert at the front. A record whose `id` is already present is a
    /// defined no-op (idempotence, not an update); returns whether the
    /// membership changed.
    pub fn add(&mut self, record: ResultRecord) -> bool {
        if self.records.iter().any(|r| r.id == record.id) {
            return false;
        }
        self.records.insert(0, record);
        self.records.truncate(VAULT_CAP);
        true
    }

    /// Merge a patch into the matching record. Absent `id` is a no-op;
    /// returns whether a record was touched.
    pub fn update(&mut self, id: &str, patch: RecordPatch) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if let Some(prompt) = patch.prompt {
            record.prompt = prompt;
        }
        if let Some(tags) = patch.tags {
            record.tags = Some(tags);
        }
        if let Some(source_type) = patch.source_type {
            record.source_type = source_type;
        }
        true
    }

    /// Delete the matching record. Absent `id` is a no-op; returns whether
    /// the membership changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&ResultRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Filtered, sorted view. Does not mutate the underlying collection;
    /// the sort is recomputed on every call.
    pub fn list(&self, filter: &str, sort: SortOrder) -> Vec<ResultRecord> {
        let needle = filter.trim().to_lowercase();
        let mut view: Vec<ResultRecord> = self
            .records
            .iter()
            .filter(|r| needle.is_empty() || r.prompt.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        match sort {
            SortOrder::Newest => view.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::Oldest => view.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        }
        view
    }

    /// Best-effort lookup of the generated source for a processed record:
    /// the processed prompt embeds the original directive, so containment
    /// is the strongest signal available. A miss is a normal outcome.
    pub fn find_original(&self, processed: &ResultRecord) -> Option<&ResultRecord> {
        if processed.source_type == SourceType::Generated {
            return None;
        }
        self.records.iter().find(|r| {
            r.source_type == SourceType::Generated
                && !r.prompt.is_empty()
                && processed.prompt.contains(&r.prompt)
        })
    }

    /// Records in insertion order, most recent first. This is the order
    /// persisted to the store.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
