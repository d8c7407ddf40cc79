//! Page-level types.

use super::{Line, Span};
use serde::{Deserialize, Serialize};

/// A single page in the document.
///
/// Pages carry no number of their own: their position in
/// [`Document::pages`](super::Document) determines the 1-indexed page number
/// reported in the outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Builder-style variant of [`add_block`](Self::add_block).
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Iterate over text blocks only.
    pub fn text_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_text())
    }

    /// Iterate over every span of every text block, in order.
    pub fn text_spans(&self) -> impl Iterator<Item = &Span> {
        self.text_blocks()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter()
    }
}

/// Kind of a content block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Text block (type 0)
    #[default]
    Text,
    /// Image block (type 1)
    Image,
}

impl BlockKind {
    /// Numeric block type: 0 for text, 1 for images.
    pub fn type_code(self) -> u8 {
        match self {
            BlockKind::Text => 0,
            BlockKind::Image => 1,
        }
    }
}

/// A region of a page grouping lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind discriminant
    #[serde(rename = "type")]
    pub kind: BlockKind,

    /// Lines in this block (empty for images)
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a text block.
    pub fn text(lines: Vec<Line>) -> Self {
        Self {
            kind: BlockKind::Text,
            lines,
        }
    }

    /// Create an image block.
    pub fn image() -> Self {
        Self {
            kind: BlockKind::Image,
            lines: Vec::new(),
        }
    }

    /// Check if this block is a text block.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_text_spans_skip_images() {
        let page = Page::letter()
            .with_block(Block::text(vec![Line::single("Hello", 12.0, "Arial")]))
            .with_block(Block::image())
            .with_block(Block::text(vec![Line::single("World", 12.0, "Arial")]));

        let texts: Vec<&str> = page.text_spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello", "World"]);
        assert_eq!(page.text_blocks().count(), 2);
    }

    #[test]
    fn test_block_type_codes() {
        assert_eq!(Block::text(vec![]).kind.type_code(), 0);
        assert_eq!(Block::image().kind.type_code(), 1);
        assert!(!Block::image().is_text());
    }

    #[test]
    fn test_block_serde_uses_type_field() {
        let json = serde_json::to_string(&Block::image()).unwrap();
        assert_eq!(json, r#"{"type":"image","lines":[]}"#);

        let block: Block = serde_json::from_str(r#"{"type":"text"}"#).unwrap();
        assert!(block.is_text());
        assert!(block.lines.is_empty());
    }
}
