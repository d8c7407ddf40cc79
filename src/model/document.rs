//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A parsed document: ordered pages of blocks, lines and spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (PDF version, info-dictionary title)
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            metadata: Metadata::default(),
            pages,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// The first page, which holds the title.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Pages after the first one.
    pub fn body_pages(&self) -> &[Page] {
        self.pages.get(1..).unwrap_or(&[])
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Parse a span dump produced by serializing a [`Document`].
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Title from the PDF info dictionary, if any
    pub title: Option<String>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Whether the document declares encryption
    pub encrypted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert!(doc.first_page().is_none());
        assert!(doc.body_pages().is_empty());
    }

    #[test]
    fn test_body_pages_skip_first() {
        let doc = Document::from_pages(vec![Page::letter(), Page::letter(), Page::letter()]);
        assert_eq!(doc.body_pages().len(), 2);
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(3).is_some());
        assert!(doc.get_page(4).is_none());
    }

    #[test]
    fn test_from_json_without_metadata() {
        let json = r#"{"pages":[{"width":612.0,"height":792.0,"blocks":[]}]}"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.metadata, Metadata::default());
    }
}
