//! # Style Overlay Store
//!
//! Holds the email-wide [`EmailStyles`] and a sparse map of per-block
//! [`BlockStyles`] overrides. Resolution always merges over the static
//! defaults, so readers never see a missing record.
//!
//! The store is keyed by block id only. It is not part of undo history and
//! does not observe block deletion: callers that delete a block are expected
//! to call [`StyleStore::delete_block_styles`] as well.

use crate::block::Block;
use crate::defaults;
use crate::error::{CommonError, CommonResult};
use crate::styles::{BlockStyleKey, BlockStyles, EmailStyleKey, EmailStyles, StyleKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleStore {
    #[serde(default)]
    email: EmailStyles,
    #[serde(default)]
    blocks: BTreeMap<String, BlockStyles>,
}

impl StyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a customized email record
    pub fn with_email_styles(email: EmailStyles) -> Self {
        Self {
            email,
            blocks: BTreeMap::new(),
        }
    }

    pub fn email_styles(&self) -> &EmailStyles {
        &self.email
    }

    pub fn update_email_style(&mut self, key: EmailStyleKey, value: impl Into<String>) {
        self.email.set(key, value);
    }

    pub fn reset_email_styles(&mut self) {
        self.email = defaults::email_styles();
    }

    /// Override merged over the defaults for `kind`
    pub fn block_styles(&self, block_id: &str, kind: StyleKind) -> BlockStyles {
        let base = defaults::block_styles(kind);
        match self.blocks.get(block_id) {
            Some(overrides) => overrides.merged_over(&base),
            None => base,
        }
    }

    /// Effective style for a concrete block: kind defaults, then the block's
    /// own `styles`, then this store's override
    pub fn resolve(&self, block: &Block) -> BlockStyles {
        let mut resolved = defaults::block_styles(StyleKind::for_content(&block.content));
        if let Some(local) = &block.styles {
            resolved = local.merged_over(&resolved);
        }
        if let Some(overrides) = self.blocks.get(&block.id) {
            resolved = overrides.merged_over(&resolved);
        }
        resolved
    }

    /// The raw sparse override, if one exists
    pub fn block_override(&self, block_id: &str) -> Option<&BlockStyles> {
        self.blocks.get(block_id)
    }

    pub fn update_block_style(&mut self, block_id: &str, key: BlockStyleKey, value: impl Into<String>) {
        self.blocks
            .entry(block_id.to_string())
            .or_default()
            .set(key, value);
    }

    pub fn delete_block_styles(&mut self, block_id: &str) -> Option<BlockStyles> {
        self.blocks.remove(block_id)
    }

    pub fn reset_all_block_styles(&mut self) {
        self.blocks.clear();
    }

    /// Number of blocks carrying an override
    pub fn override_count(&self) -> usize {
        self.blocks.len()
    }

    /// Serialize the email record and every override (2-space indented when `pretty`)
    pub fn to_json(&self, pretty: bool) -> String {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };

        // Only string maps and string fields; serialization cannot fail
        result.unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a saved store. Missing sections fall back to defaults.
    pub fn try_from_json(text: &str) -> CommonResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(CommonError::MalformedInput(
                "expected a JSON object of styles".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}
