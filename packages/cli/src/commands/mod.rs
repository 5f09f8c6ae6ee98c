pub mod format;
pub mod render;

pub use format::{format, FormatArgs};
pub use render::{render, RenderArgs};
