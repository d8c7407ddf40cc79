//! Document model types for typography-based outline inference.
//!
//! The model is the contract between the PDF access layer and the outline
//! engine: pages hold blocks, text blocks hold lines, lines hold spans, and
//! every span carries its text, font size and font descriptor. Documents can
//! also be built by hand or deserialized from a span dump.

mod document;
mod outline;
mod page;
mod text;

pub use document::{Document, Metadata};
pub use outline::{HeadingLevel, OutlineEntry, OutlineResult};
pub use page::{Block, BlockKind, Page};
pub use text::{Line, Span};
