//! # Mailblocks HTML Compiler
//!
//! Turns a block list into email-safe HTML:
//!
//! ```text
//! blocks + StyleStore ─▶ serialize_styled ─▶ normalize_lists ─▶ wrap_as_document
//! ```
//!
//! Every piece of user text passes through [`escape_html`] before it reaches
//! the output.

mod compiler;
mod list_normalizer;


pub use compiler::{
    escape_html, export_html, serialize, serialize_styled, wrap_as_document, CompileError,
    DocumentOptions,
};
pub use list_normalizer::normalize_lists;
