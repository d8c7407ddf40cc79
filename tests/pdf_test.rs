//! Integration tests for reading generated PDFs.

mod common;

use common::{bold, build_pdf, design_document, regular};
use pdfoutline::{
    extract_outline, extract_outline_bytes, BlockKind, Error, HeadingLevel, OutlineEntry,
    Outliner, ParseOptions, PdfParser,
};

#[test]
fn test_parser_reads_pages_and_metadata() {
    let parser = PdfParser::from_bytes(&design_document()).unwrap();
    assert_eq!(parser.page_count(), 3);
    assert_eq!(parser.version(), "1.5");

    let doc = parser.parse().unwrap();
    assert_eq!(doc.page_count(), 3);
    assert_eq!(doc.metadata.pdf_version, "1.5");
    assert_eq!(doc.metadata.title.as_deref(), Some("Design Document v2"));
    assert!(!doc.metadata.encrypted);
}

#[test]
fn test_parser_recovers_fonts_and_sizes() {
    let doc = PdfParser::from_bytes(&design_document())
        .unwrap()
        .parse()
        .unwrap();

    let first = doc.pages[0].text_spans().next().unwrap();
    assert_eq!(first.text, "Design");
    assert_eq!(first.size, 24.0);
    assert_eq!(first.font, "Helvetica-Bold");

    let body = doc.pages[0].text_spans().last().unwrap();
    assert_eq!(body.text, "Prepared by the platform team");
    assert_eq!(body.font, "Times-Roman");
}

#[test]
fn test_lines_in_top_to_bottom_order() {
    let doc = PdfParser::from_bytes(&design_document())
        .unwrap()
        .parse()
        .unwrap();
    let texts: Vec<&str> = doc.pages[1].text_spans().map(|s| s.text.as_str()).collect();
    assert_eq!(texts.first(), Some(&"DRAFT"));
    assert_eq!(texts.last(), Some(&"Scope covers the core services."));
}

#[test]
fn test_image_becomes_image_block() {
    let doc = PdfParser::from_bytes(&design_document())
        .unwrap()
        .parse()
        .unwrap();
    let last_page = &doc.pages[2];
    assert_eq!(last_page.blocks.last().map(|b| b.kind), Some(BlockKind::Image));
    assert!(doc.pages[1].blocks.iter().all(|b| b.kind == BlockKind::Text));
}

#[test]
fn test_outline_of_generated_pdf() {
    let result = extract_outline_bytes(&design_document()).unwrap();
    assert_eq!(result.title, "Design Document");
    assert_eq!(
        result.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "1. Introduction", 2),
            OutlineEntry::new(HeadingLevel::H2, "1.1 Purpose", 2),
            OutlineEntry::new(HeadingLevel::H3, "1.1.1 Scope", 2),
            OutlineEntry::new(HeadingLevel::H1, "2. Requirements", 3),
            OutlineEntry::new(HeadingLevel::H2, "2.1 Functional", 3),
        ]
    );
}

#[test]
fn test_sequential_and_parallel_agree() {
    let bytes = design_document();
    let parallel = PdfParser::from_bytes(&bytes).unwrap().parse().unwrap();
    let sequential = PdfParser::from_bytes_with_options(&bytes, ParseOptions::new().sequential())
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(parallel, sequential);
    assert_eq!(extract_outline(&parallel), extract_outline(&sequential));
}

#[test]
fn test_reader_and_file_inputs() {
    let bytes = design_document();
    let from_reader = Outliner::new().outline_reader(bytes.as_slice()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.pdf");
    std::fs::write(&path, &bytes).unwrap();
    let from_file = pdfoutline::extract_outline_file(&path).unwrap();

    assert_eq!(from_reader, from_file);
}

#[test]
fn test_single_page_pdf_has_no_outline() {
    let bytes = build_pdf(
        vec![vec![
            bold(20, 700, "Memo"),
            regular(11, 660, "Please read before Friday."),
        ]],
        None,
    );
    let result = extract_outline_bytes(&bytes).unwrap();
    assert_eq!(result.title, "Memo");
    assert!(result.outline.is_empty());
}

#[test]
fn test_blank_first_page_is_untitled() {
    let bytes = build_pdf(vec![vec![], vec![bold(16, 700, "Chapter One")]], None);
    let result = extract_outline_bytes(&bytes).unwrap();
    assert_eq!(result.title, "Untitled");
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Chapter One", 2)]
    );
}

#[test]
fn test_page_out_of_range() {
    let parser = PdfParser::from_bytes(&design_document()).unwrap();
    assert!(parser.parse_page(1).is_ok());
    assert!(matches!(
        parser.parse_page(9),
        Err(Error::PageOutOfRange(9, 3))
    ));
}

#[test]
fn test_invalid_input_is_error() {
    assert!(matches!(
        PdfParser::from_bytes(b"plain text, not a document"),
        Err(Error::UnknownFormat)
    ));
    assert!(matches!(
        PdfParser::from_bytes(b"%PDF-x.y\n"),
        Err(Error::UnsupportedVersion(_))
    ));
}
