//! PDF parsing module.

mod backend;
mod detect;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, is_pdf_bytes, PdfFormat};
pub use layout::{
    layout_page, ContentInterpreter, ImagePlacement, LayoutAnalyzer, PageContent, TextLine,
    TextSpan,
};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
