//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Document error: {0}")]
    Document(#[from] mailblocks_common::CommonError),

    #[error("Compile error: {0}")]
    Compile(#[from] mailblocks_compiler_html::CompileError),
}
