//! # pdfoutline
//!
//! Infers the title and a three-level heading outline of a PDF from its
//! typography alone.
//!
//! Tagged structure and bookmarks are ignored. Headings are recovered from
//! how text looks: the largest text on the first page is the title, and the
//! most prominent font styles on the remaining pages become H1, H2 and H3.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_outline_file("report.pdf")?;
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Title extraction**: largest text on page one, joined across lines
//! - **Style profiling**: ranks (size, bold) styles and maps them to levels
//! - **Outline building**: reading-order headings with page numbers
//! - **Batch processing**: whole directories in parallel with Rayon
//! - **Output formats**: JSON, Markdown, plain text

pub mod analyze;
pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analyze::{BoldDetection, OutlineOptions, OutlinePipeline, StyleKey, StyleMap};
pub use batch::{BatchProcessor, BatchSummary, DocumentReport, ReportStatus};
pub use error::{Error, Result};
pub use model::{
    Block, BlockKind, Document, HeadingLevel, Line, Metadata, OutlineEntry, OutlineResult, Page,
    Span,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into pages of positioned text.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::parse_file;
///
/// let doc = parse_file("report.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    PdfParser::open(path)?.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    PdfParser::from_bytes(data)?.parse()
}

/// Infer the title and outline of a parsed document with default options.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, Block, Document, Line, Page};
///
/// let doc = Document::from_pages(vec![Page::letter().with_block(Block::text(vec![
///     Line::single("Annual Report", 24.0, "Helvetica-Bold"),
/// ]))]);
/// assert_eq!(extract_outline(&doc).title, "Annual Report");
/// ```
pub fn extract_outline(doc: &Document) -> OutlineResult {
    OutlinePipeline::default().run(doc)
}

/// Infer the title and outline of a parsed document.
pub fn extract_outline_with_options(doc: &Document, options: &OutlineOptions) -> OutlineResult {
    OutlinePipeline::new(options.clone()).run(doc)
}

/// Parse a PDF file and infer its outline.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_file;
///
/// let result = extract_outline_file("report.pdf").unwrap();
/// for entry in &result.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    Outliner::new().outline_file(path)
}

/// Parse PDF bytes and infer the outline.
pub fn extract_outline_bytes(data: &[u8]) -> Result<OutlineResult> {
    Outliner::new().outline_bytes(data)
}

/// Builder combining parse and outline options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{OutlineOptions, Outliner};
///
/// let result = Outliner::new()
///     .sequential()
///     .with_outline_options(OutlineOptions::new().extended_bold())
///     .outline_file("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Outliner {
    parse_options: ParseOptions,
    pipeline: OutlinePipeline,
}

impl Outliner {
    /// Create an outliner with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            pipeline: OutlinePipeline::default(),
        }
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.pipeline = OutlinePipeline::new(options);
        self
    }

    /// Fail on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.with_error_mode(ErrorMode::Strict);
        self
    }

    /// Disable parallel page layout.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Parse options in use.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Outline options in use.
    pub fn outline_options(&self) -> &OutlineOptions {
        self.pipeline.options()
    }

    /// The analysis pipeline.
    pub fn pipeline(&self) -> &OutlinePipeline {
        &self.pipeline
    }

    /// Infer the outline of an already parsed document.
    pub fn outline_document(&self, doc: &Document) -> OutlineResult {
        self.pipeline.run(doc)
    }

    /// Parse a PDF file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        PdfParser::open_with_options(path, self.parse_options.clone())?.parse()
    }

    /// Parse a PDF file and infer its outline.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let doc = self.parse_file(path)?;
        Ok(self.pipeline.run(&doc))
    }

    /// Parse PDF bytes and infer the outline.
    pub fn outline_bytes(&self, data: &[u8]) -> Result<OutlineResult> {
        let doc = PdfParser::from_bytes_with_options(data, self.parse_options.clone())?.parse()?;
        Ok(self.pipeline.run(&doc))
    }

    /// Read a PDF from a reader and infer the outline.
    pub fn outline_reader<R: Read>(&self, reader: R) -> Result<OutlineResult> {
        let doc =
            PdfParser::from_reader_with_options(reader, self.parse_options.clone())?.parse()?;
        Ok(self.pipeline.run(&doc))
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .strict()
            .sequential()
            .with_outline_options(OutlineOptions::new().with_max_levels(2));
        assert_eq!(outliner.parse_options().error_mode, ErrorMode::Strict);
        assert!(!outliner.parse_options().parallel);
        assert_eq!(outliner.outline_options().max_levels, 2);
    }

    #[test]
    fn test_extract_outline_empty_document() {
        let result = extract_outline(&Document::new());
        assert_eq!(result.title, "Untitled");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_extract_outline_bytes_rejects_garbage() {
        assert!(matches!(
            extract_outline_bytes(b"hello"),
            Err(Error::UnknownFormat)
        ));
    }
}
