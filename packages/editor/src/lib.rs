//! # Mailblocks Editor
//!
//! Core document editing engine for block-based emails.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI collaborator: gestures → Mutations       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - History: bounded undo/redo snapshots     │
//! │  - BlockDocument: ordered blocks+selection  │
//! │  - StyleStore: overrides (not historied)    │
//! │  - save flags                               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: blocks → email HTML          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailblocks_editor::EditSession;
//! use mailblocks_common::BlockContent;
//!
//! let mut session = EditSession::new("session-1");
//! let id = session.add_block(BlockContent::text("Hello"), None)?;
//! session.undo();
//! session.redo();
//!
//! let html = session.export_html()?;
//! ```

mod document;
mod errors;
mod mutations;
mod session;
mod undo_stack;

pub use document::BlockDocument;
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError};
pub use session::{EditSession, SaveSnapshot};
pub use undo_stack::{History, DEFAULT_HISTORY_CAPACITY};

// Re-export common types for convenience
pub use mailblocks_common::{Block, BlockContent, BlockPatch};
