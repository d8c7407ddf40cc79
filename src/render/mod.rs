//! Rendering module for converting outline results to output formats.

mod json;
mod markdown;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
pub use text::to_text;
