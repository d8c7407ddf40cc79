//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Page};

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::detect::{detect_format_from_bytes, detect_format_from_path};
use super::layout::{layout_page, LayoutAnalyzer, PageContent};
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
///
/// Content streams are interpreted one page at a time against the loaded
/// document; grouping the resulting spans into lines and blocks runs on the
/// rayon pool when [`ParseOptions::parallel`] is set.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        detect_format_from_path(path)?;

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }

    /// Document metadata.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            title: self.backend.info_title(),
            pdf_version: self.backend.version(),
            encrypted: self.backend.is_encrypted(),
        }
    }

    /// Parse the document into pages of positioned text.
    pub fn parse(&self) -> Result<Document> {
        let contents = self
            .backend
            .pages()
            .into_iter()
            .map(|(page_num, page_id)| self.page_content(page_num, page_id))
            .collect::<Result<Vec<_>>>()?;

        let normalize = self.options.normalize_unicode;
        let pages: Vec<Page> = if self.options.parallel {
            contents
                .into_par_iter()
                .map(|c| layout_page(c, normalize))
                .collect()
        } else {
            contents
                .into_iter()
                .map(|c| layout_page(c, normalize))
                .collect()
        };

        log::debug!("Parsed {} pages", pages.len());

        Ok(Document {
            metadata: self.metadata(),
            pages,
        })
    }

    /// Parse a single page (1-indexed).
    pub fn parse_page(&self, page_num: u32) -> Result<Page> {
        let pages = self.backend.pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        let content = self.page_content(page_num, page_id)?;
        Ok(layout_page(content, self.options.normalize_unicode))
    }

    /// Interpret one page, applying the error mode.
    fn page_content(&self, page_num: u32, page_id: PageId) -> Result<PageContent> {
        match LayoutAnalyzer::new(&self.backend).extract_page(page_id) {
            Ok(content) => Ok(content),
            Err(e) if self.options.error_mode == ErrorMode::Strict => Err(Error::TextExtract(
                format!("Page {}: {}", page_num, e),
            )),
            Err(e) => {
                // In lenient mode, keep the page but drop its content
                log::warn!("Failed to extract text from page {}: {}", page_num, e);
                let (width, height) = self.backend.page_size(page_id);
                Ok(PageContent {
                    width,
                    height,
                    ..Default::default()
                })
            }
        }
    }
}
