//! Undo/redo history of whole-document snapshots.
//!
//! History is a single linear list of snapshots and a cursor pointing at the
//! entry that matches the live document. Committing after an undo discards
//! every entry past the cursor. Snapshots are owned copies: a committed
//! document is cloned in, and undo/redo hand out clones, so nothing outside
//! the history can alias a stored entry.
//!
//! Gestures commit once at pointer-up; the session makes sure no commit
//! happens mid-gesture.

use lc_core::Document;

/// Linear snapshot history.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Document>,
    cursor: usize,
    /// Maximum number of entries kept; the oldest are evicted first.
    capacity: Option<usize>,
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: &Document) -> Self {
        Self::with_capacity(initial, None)
    }

    /// Like [`History::new`], keeping at most `capacity` entries (minimum 1).
    pub fn with_capacity(initial: &Document, capacity: Option<usize>) -> Self {
        Self {
            entries: vec![initial.clone()],
            cursor: 0,
            capacity: capacity.map(|c| c.max(1)),
        }
    }

    /// Record `doc` as the newest state, discarding any redo entries.
    pub fn commit(&mut self, doc: &Document) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(doc.clone());
        if let Some(cap) = self.capacity
            && self.entries.len() > cap
        {
            let excess = self.entries.len() - cap;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
        log::debug!("history commit → {}/{}", self.cursor + 1, self.entries.len());
    }

    /// Step back. Returns the snapshot to restore, or `None` at the oldest
    /// entry.
    pub fn undo(&mut self) -> Option<Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        log::debug!("undo → {}/{}", self.cursor + 1, self.entries.len());
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the newest
    /// entry.
    pub fn redo(&mut self) -> Option<Document> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        log::debug!("redo → {}/{}", self.cursor + 1, self.entries.len());
        Some(self.entries[self.cursor].clone())
    }

    /// Forget everything and start over from `doc`.
    pub fn reset(&mut self, doc: &Document) {
        self.entries.clear();
        self.entries.push(doc.clone());
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The snapshot matching the live document.
    pub fn current(&self) -> &Document {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
