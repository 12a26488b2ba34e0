//! Linear undo/redo over editor snapshots.
//!
//! Classic branch-discard model: committing while the cursor sits behind
//! the tail erases everything ahead of the cursor before appending. There
//! is no redo-branch preservation.

use crate::model::Snapshot;

#[derive(Debug, Default)]
pub struct EditHistory {
    snapshots: Vec<Snapshot>,
    /// `None` until the first commit.
    cursor: Option<usize>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only way snapshots enter the history. Truncates the redo branch
    /// unconditionally and moves the cursor to the new tail.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back and return the new current snapshot. No-op (returns
    /// `None`) when already at the first snapshot or empty.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1)
            }
            _ => None,
        }
    }

    /// Step forward and return the new current snapshot. No-op at the tail.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(c) if c + 1 < self.snapshots.len() => {
                self.cursor = Some(c + 1);
                self.snapshots.get(c + 1)
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    /// Zero-based cursor position, `None` until the first commit.
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.snapshots.len())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AspectRatio, EditParams};

    fn snap(url: &str) -> Snapshot {
        Snapshot {
            image_url: url.to_string(),
            aspect_ratio: AspectRatio::Square,
            params: EditParams::default(),
        }
    }

    #[test]
    fn starts_empty_with_no_current() {
        let mut history = EditHistory::new();
        assert!(history.current().is_none());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn commit_moves_cursor_to_tail() {
        let mut history = EditHistory::new();
        history.commit(snap("a"));
        history.commit(snap("b"));
        assert_eq!(history.current().unwrap().image_url, "b");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn undo_then_redo_walks_the_sequence() {
        let mut history = EditHistory::new();
        history.commit(snap("a"));
        history.commit(snap("b"));

        assert_eq!(history.undo().unwrap().image_url, "a");
        assert_eq!(history.redo().unwrap().image_url, "b");
    }

    #[test]
    fn undo_at_first_snapshot_is_noop() {
        let mut history = EditHistory::new();
        history.commit(snap("a"));
        assert!(history.undo().is_none());
        assert_eq!(history.current().unwrap().image_url, "a");
    }

    #[test]
    fn redo_after_fresh_commit_is_noop() {
        let mut history = EditHistory::new();
        history.commit(snap("a"));
        history.commit(snap("b"));
        assert!(history.redo().is_none());
        assert_eq!(history.current().unwrap().image_url, "b");
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        // The branch-discard law: A, B, undo, C => [A, C] with cursor at C.
        let mut history = EditHistory::new();
        history.commit(snap("a"));
        history.commit(snap("b"));
        history.undo();
        history.commit(snap("c"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().image_url, "c");
        assert!(history.redo().is_none(), "b must be unreachable");
        assert_eq!(history.undo().unwrap().image_url, "a");
    }

    #[test]
    fn can_undo_redo_track_cursor() {
        let mut history = EditHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history.commit(snap("a"));
        history.commit(snap("b"));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo();
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }
}
