//! # Block Document
//!
//! The ordered block list plus the selection pointer. A `BlockDocument` is
//! also the snapshot unit kept by [`History`](crate::History): cloning one
//! captures everything undo needs to restore.
//!
//! Operations against stale ids or indices are silent no-ops, since
//! interactive callers routinely race drag/delete gestures against renders.
//! The only hard failure is inserting a duplicate id.

use crate::mutations::MutationError;
use mailblocks_common::{Block, BlockPatch};

/// Ordered blocks + selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    selected: Option<String>,
}

impl BlockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing list, rejecting duplicate ids
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, MutationError> {
        let mut doc = Self::new();
        for block in blocks {
            doc.add_block(block, None)?;
        }
        Ok(doc)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Insert at `index` (clamped to `[0, len]`) or append.
    ///
    /// Returns the index the block landed at.
    pub fn add_block(&mut self, block: Block, index: Option<usize>) -> Result<usize, MutationError> {
        if self.contains(&block.id) {
            return Err(MutationError::InvalidBlock(block.id));
        }

        let at = index.unwrap_or(self.blocks.len()).min(self.blocks.len());
        self.blocks.insert(at, block);
        Ok(at)
    }

    /// Merge `patch` into the block with `id`. Returns false if absent.
    pub fn update_block(&mut self, id: &str, patch: &BlockPatch) -> bool {
        match self.blocks.iter_mut().find(|block| block.id == id) {
            Some(block) => {
                patch.apply_to(block);
                true
            }
            None => false,
        }
    }

    /// Remove the block with `id`, clearing the selection if it pointed there
    pub fn delete_block(&mut self, id: &str) -> Option<Block> {
        let index = self.position(id)?;
        let removed = self.blocks.remove(index);

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        Some(removed)
    }

    /// Standard list reorder. Returns false (and changes nothing) when
    /// either index is out of range.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks.len();
        if from >= len || to >= len {
            return false;
        }

        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }

    /// Set the selection pointer. The id is not validated.
    pub fn select_block(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected block, if the pointer refers to one that exists
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }
}
