//! # Undo/Redo History
//!
//! Snapshot-based history around a [`BlockDocument`].
//!
//! ## Design
//!
//! - Before a mutation is applied, the current document is pushed to `past`
//! - Undo swaps the current document with the top of `past`, keeping the
//!   current one on `future`
//! - Redo is the mirror image
//! - New mutations clear `future`
//! - `past` is bounded; the oldest snapshot is evicted first
//!
//! Selection changes go straight to the current document and are never
//! recorded. Restoring a snapshot restores the selection it was taken with.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.apply(&Mutation::DeleteBlock { id: "intro".into() })?;
//! history.undo();
//! history.redo();
//! ```

use crate::document::BlockDocument;
use crate::mutations::{Mutation, MutationError};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Default number of undo levels
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded undo/redo over document snapshots
#[derive(Debug, Clone)]
pub struct History {
    /// The current state
    present: BlockDocument,

    /// Earlier states (most recent last)
    past: VecDeque<BlockDocument>,

    /// Undone states (most recent last)
    future: Vec<BlockDocument>,

    /// Maximum number of undo levels (0 = unlimited)
    capacity: usize,
}

impl History {
    /// History over an empty document with the default capacity (50)
    pub fn new() -> Self {
        Self::from_document(BlockDocument::new())
    }

    /// History over an existing document with the default capacity
    pub fn from_document(document: BlockDocument) -> Self {
        Self::with_capacity(document, DEFAULT_HISTORY_CAPACITY)
    }

    /// History with a custom number of undo levels
    pub fn with_capacity(document: BlockDocument, capacity: usize) -> Self {
        Self {
            present: document,
            past: VecDeque::new(),
            future: Vec::new(),
            capacity,
        }
    }

    pub fn document(&self) -> &BlockDocument {
        &self.present
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Apply a mutation and record the previous state for undo.
    ///
    /// A failed mutation leaves both the document and the history untouched.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), MutationError> {
        let mut next = self.present.clone();
        mutation.apply(&mut next)?;

        let previous = std::mem::replace(&mut self.present, next);
        self.push_past(previous);

        // New action invalidates the redo chain
        self.future.clear();

        debug!(
            mutation = mutation.name(),
            undo_levels = self.past.len(),
            "Applied mutation"
        );
        Ok(())
    }

    /// Update the selection pointer without recording history
    pub fn select(&mut self, id: Option<String>) {
        self.present.select_block(id);
    }

    fn push_past(&mut self, snapshot: BlockDocument) {
        self.past.push_back(snapshot);

        if self.capacity > 0 && self.past.len() > self.capacity {
            self.past.pop_front();
            trace!(capacity = self.capacity, "Evicted oldest undo snapshot");
        }
    }

    /// Restore the previous state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(snapshot) => {
                let current = std::mem::replace(&mut self.present, snapshot);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone state. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(snapshot) => {
                let current = std::mem::replace(&mut self.present, snapshot);
                self.push_past(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Drop all undo/redo history, keeping the current document
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_common::{Block, BlockContent};

    fn add(id: &str) -> Mutation {
        Mutation::AddBlock {
            block: Block::with_id(id, BlockContent::text(id)),
            index: None,
        }
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_apply_undo_redo() {
        let mut history = History::new();
        history.apply(&add("a")).unwrap();

        assert_eq!(history.undo_levels(), 1);
        assert!(history.undo());
        assert!(history.document().is_empty());
        assert_eq!(history.redo_levels(), 1);

        assert!(history.redo());
        assert_eq!(history.document().len(), 1);
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.document().is_empty());
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut history = History::new();
        history.apply(&add("a")).unwrap();
        history.undo();
        assert_eq!(history.redo_levels(), 1);

        history.apply(&add("b")).unwrap();
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.redo());
    }

    #[test]
    fn test_failed_mutation_records_nothing() {
        let mut history = History::new();
        history.apply(&add("a")).unwrap();
        history.undo();
        history.redo();

        assert!(history.apply(&add("a")).is_err());
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.document().len(), 1);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_capacity(BlockDocument::new(), 2);
        for id in ["a", "b", "c"] {
            history.apply(&add(id)).unwrap();
        }

        assert_eq!(history.undo_levels(), 2);
        history.undo();
        history.undo();
        assert!(!history.undo());

        // State after the first mutation; the empty document is gone
        assert_eq!(history.document().len(), 1);
    }

    #[test]
    fn test_zero_capacity_is_unlimited() {
        let mut history = History::with_capacity(BlockDocument::new(), 0);
        for i in 0..120 {
            history.apply(&add(&i.to_string())).unwrap();
        }
        assert_eq!(history.undo_levels(), 120);
    }

    #[test]
    fn test_selection_is_not_recorded_but_restored() {
        let mut history = History::new();
        history.apply(&add("a")).unwrap();
        history.select(Some("a".to_string()));
        assert_eq!(history.undo_levels(), 1);

        history.apply(&add("b")).unwrap();
        history.select(None);
        history.undo();

        assert_eq!(history.document().selected_id(), Some("a"));
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.apply(&add("a")).unwrap();
        history.undo();
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
