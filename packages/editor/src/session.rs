//! # Edit Session
//!
//! The single owner of one email's editing state: the undoable block
//! document, the style overlay, and the save bookkeeping. Everything a UI
//! needs goes through here; there is no ambient shared state.
//!
//! Style maps live outside undo history and are not touched when a block is
//! deleted. Callers deleting a block should also call
//! [`EditSession::delete_block_styles`] if they want the override gone.
//!
//! ## Saving
//!
//! Persisting is an external concern. The session hands out a
//! [`SaveSnapshot`] and tracks two flags: whether a save is in flight and
//! whether the current revision differs from the last saved one. It does
//! not retry or queue saves.

use crate::{BlockDocument, EditorError, History, Mutation};
use mailblocks_common::{
    from_json, to_json, Block, BlockContent, BlockPatch, BlockStyleKey, BlockStyles,
    EmailStyleKey, StyleKind, StyleStore,
};
use mailblocks_compiler_html::{export_html, DocumentOptions};
use tracing::{debug, warn};

/// Everything an external save collaborator needs
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSnapshot {
    /// Session revision this snapshot was taken at
    pub revision: u64,

    /// Exported email document
    pub html: String,

    /// Block list as pretty JSON
    pub blocks_json: String,

    /// Email styles and per-block overrides as pretty JSON
    pub styles_json: String,
}

/// Single-user edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Title used for exported documents
    pub title: String,

    history: History,
    styles: StyleStore,

    /// Bumped on every document or style change
    revision: u64,
    saved_revision: u64,
    /// Revision of the most recently started save still in flight
    pending_save: Option<u64>,
}

impl EditSession {
    /// Create a session over an empty document
    pub fn new(id: impl Into<String>) -> Self {
        Self::from_history(id, History::new())
    }

    /// Create a session over an existing block list
    pub fn with_blocks(id: impl Into<String>, blocks: Vec<Block>) -> Result<Self, EditorError> {
        let document = BlockDocument::from_blocks(blocks)?;
        Ok(Self::from_history(id, History::from_document(document)))
    }

    /// Create a session from persisted JSON.
    ///
    /// Malformed input yields an empty document. Duplicate ids keep the
    /// first occurrence.
    pub fn from_json(id: impl Into<String>, text: &str) -> Self {
        let mut document = BlockDocument::new();
        for block in from_json(text) {
            let block_id = block.id.clone();
            if document.add_block(block, None).is_err() {
                warn!(block_id = %block_id, "Dropping block with duplicate id");
            }
        }
        Self::from_history(id, History::from_document(document))
    }

    /// Rebuild a session from a [`SaveSnapshot`]'s JSON payloads.
    ///
    /// Lenient like [`EditSession::from_json`]: malformed styles fall back
    /// to the defaults.
    pub fn restore(id: impl Into<String>, blocks_json: &str, styles_json: &str) -> Self {
        let session = Self::from_json(id, blocks_json);
        let styles = StyleStore::try_from_json(styles_json).unwrap_or_else(|error| {
            warn!(session = %session.id, %error, "Discarding malformed saved styles");
            StyleStore::new()
        });
        session.with_styles(styles)
    }

    fn from_history(id: impl Into<String>, history: History) -> Self {
        Self {
            id: id.into(),
            title: DocumentOptions::default().title,
            history,
            styles: StyleStore::new(),
            revision: 0,
            saved_revision: 0,
            pending_save: None,
        }
    }

    /// Replace the style overlay (e.g. when loading saved styles)
    pub fn with_styles(mut self, styles: StyleStore) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    // ---- document ----

    pub fn document(&self) -> &BlockDocument {
        self.history.document()
    }

    pub fn blocks(&self) -> &[Block] {
        self.history.document().blocks()
    }

    /// Apply any undoable mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        self.history.apply(&mutation)?;
        self.touch();
        Ok(())
    }

    /// Create a block with a fresh id and insert it. Returns the new id.
    pub fn add_block(&mut self, content: BlockContent, index: Option<usize>) -> Result<String, EditorError> {
        let block = Block::new(content);
        let id = block.id.clone();
        self.insert_block(block, index)?;
        Ok(id)
    }

    /// Insert a caller-built block; fails on a duplicate id
    pub fn insert_block(&mut self, block: Block, index: Option<usize>) -> Result<(), EditorError> {
        self.apply(Mutation::AddBlock { block, index })
    }

    pub fn update_block(&mut self, id: &str, patch: BlockPatch) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateBlock {
            id: id.to_string(),
            patch,
        })
    }

    /// Remove a block. Its style override, if any, is left in place.
    pub fn delete_block(&mut self, id: &str) -> Result<(), EditorError> {
        self.apply(Mutation::DeleteBlock { id: id.to_string() })
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.apply(Mutation::MoveBlock { from, to })
    }

    pub fn select_block(&mut self, id: Option<&str>) {
        self.history.select(id.map(str::to_string));
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.history.document().selected_block()
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            self.touch();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        if redone {
            self.touch();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ---- styles ----

    pub fn styles(&self) -> &StyleStore {
        &self.styles
    }

    /// Resolved styles for a block id against the defaults for `kind`
    pub fn block_styles(&self, block_id: &str, kind: StyleKind) -> BlockStyles {
        self.styles.block_styles(block_id, kind)
    }

    pub fn update_block_style(&mut self, block_id: &str, key: BlockStyleKey, value: impl Into<String>) {
        self.styles.update_block_style(block_id, key, value);
        self.touch();
    }

    pub fn delete_block_styles(&mut self, block_id: &str) {
        if self.styles.delete_block_styles(block_id).is_some() {
            self.touch();
        }
    }

    pub fn reset_all_block_styles(&mut self) {
        self.styles.reset_all_block_styles();
        self.touch();
    }

    pub fn update_email_style(&mut self, key: EmailStyleKey, value: impl Into<String>) {
        self.styles.update_email_style(key, value);
        self.touch();
    }

    pub fn reset_email_styles(&mut self) {
        self.styles.reset_email_styles();
        self.touch();
    }

    // ---- export ----

    pub fn to_json(&self, pretty: bool) -> String {
        to_json(self.blocks(), pretty)
    }

    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions::from_email_styles(self.styles.email_styles()).with_title(self.title.clone())
    }

    /// Full email document for the current state
    pub fn export_html(&self) -> Result<String, EditorError> {
        Ok(export_html(self.blocks(), &self.styles, &self.document_options())?)
    }

    // ---- saving ----

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.revision != self.saved_revision
    }

    /// Mark a save as in flight and hand back what to persist
    pub fn begin_save(&mut self) -> Result<SaveSnapshot, EditorError> {
        if self.pending_save.is_some() {
            warn!(session = %self.id, "Save requested while another save is in flight");
        }

        let snapshot = SaveSnapshot {
            revision: self.revision,
            html: self.export_html()?,
            blocks_json: self.to_json(true),
            styles_json: self.styles.to_json(true),
        };
        self.pending_save = Some(snapshot.revision);

        debug!(session = %self.id, revision = snapshot.revision, "Save started");
        Ok(snapshot)
    }

    /// Record that the snapshot taken at `revision` was persisted.
    ///
    /// Completions older than the last saved revision, or newer than the
    /// session itself, are ignored. The in-flight flag clears once the
    /// latest started save has landed.
    pub fn complete_save(&mut self, revision: u64) {
        if revision < self.saved_revision || revision > self.revision {
            warn!(
                session = %self.id,
                revision,
                saved = self.saved_revision,
                "Ignoring out-of-order save completion"
            );
            return;
        }

        self.saved_revision = revision;
        if self.pending_save.is_some_and(|pending| revision >= pending) {
            self.pending_save = None;
        }
        debug!(session = %self.id, revision, "Save completed");
    }

    /// Record that the in-flight save failed; unsaved changes remain
    pub fn fail_save(&mut self) {
        self.pending_save = None;
        warn!(session = %self.id, revision = self.revision, "Save failed");
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
