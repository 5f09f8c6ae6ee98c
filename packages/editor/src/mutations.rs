//! # Block Mutations
//!
//! Document-changing operations as values. Everything that should be
//! undoable goes through a [`Mutation`]; selection and style edits do not.
//!
//! ## Semantics
//!
//! - `AddBlock`: insert at a clamped index or append; duplicate id fails
//! - `UpdateBlock`: field merge; missing id is a no-op
//! - `DeleteBlock`: missing id is a no-op; clears a matching selection
//! - `MoveBlock`: list reorder; out-of-range indices are a no-op

use crate::document::BlockDocument;
use mailblocks_common::{Block, BlockPatch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Undoable document operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a block at `index` (append when absent)
    AddBlock {
        block: Block,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Merge fields into an existing block
    UpdateBlock {
        id: String,
        patch: BlockPatch,
    },

    /// Remove a block
    DeleteBlock {
        id: String,
    },

    /// Reorder: take the block at `from`, reinsert it at `to`
    MoveBlock {
        from: usize,
        to: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Invalid block: id {0} already exists")]
    InvalidBlock(String),
}

impl Mutation {
    /// Apply to the document. Only `AddBlock` can fail.
    pub fn apply(&self, doc: &mut BlockDocument) -> Result<(), MutationError> {
        match self {
            Mutation::AddBlock { block, index } => {
                doc.add_block(block.clone(), *index)?;
            }

            Mutation::UpdateBlock { id, patch } => {
                doc.update_block(id, patch);
            }

            Mutation::DeleteBlock { id } => {
                doc.delete_block(id);
            }

            Mutation::MoveBlock { from, to } => {
                doc.move_block(*from, *to);
            }
        }

        Ok(())
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddBlock { .. } => "add_block",
            Mutation::UpdateBlock { .. } => "update_block",
            Mutation::DeleteBlock { .. } => "delete_block",
            Mutation::MoveBlock { .. } => "move_block",
        }
    }
}
