//! # Mailblocks Common
//!
//! Data model shared by the editor and the HTML compiler:
//!
//! - [`Block`] and its typed [`BlockContent`]
//! - [`BlockStyles`] / [`EmailStyles`] records and their default tables
//! - [`StyleStore`], the per-block and email-wide style overlay
//! - the JSON codec used to persist block lists

pub mod block;
pub mod defaults;
pub mod error;
pub mod json;
pub mod style_store;
pub mod styles;

pub use block::*;
pub use error::*;
pub use json::{from_json, to_json, try_from_json};
pub use style_store::StyleStore;
pub use styles::*;
