//! Helpers for building small PDFs in tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Something drawn on a test page.
pub enum Item {
    /// Text shown with font resource `F1` (Helvetica-Bold) or `F2` (Times-Roman)
    Text {
        font: &'static str,
        size: i64,
        x: i64,
        y: i64,
        text: &'static str,
    },
    /// The shared image XObject drawn 100x50 at (x, y)
    Image { x: i64, y: i64 },
}

pub fn bold(size: i64, y: i64, text: &'static str) -> Item {
    Item::Text {
        font: "F1",
        size,
        x: 72,
        y,
        text,
    }
}

pub fn regular(size: i64, y: i64, text: &'static str) -> Item {
    Item::Text {
        font: "F2",
        size,
        x: 72,
        y,
        text,
    }
}

/// Build a PDF with one page per item list.
pub fn build_pdf(pages: Vec<Vec<Item>>, info_title: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
        "Encoding" => "WinAnsiEncoding",
    });
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1,
            "Height" => 1,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        vec![0u8],
    ));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => bold_id,
            "F2" => regular_id,
        },
        "XObject" => dictionary! {
            "Im1" => image_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for items in pages {
        let mut operations = Vec::new();
        for item in items {
            match item {
                Item::Text {
                    font,
                    size,
                    x,
                    y,
                    text,
                } => {
                    operations.push(Operation::new("BT", vec![]));
                    operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
                    operations.push(Operation::new("Td", vec![x.into(), y.into()]));
                    operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
                    operations.push(Operation::new("ET", vec![]));
                }
                Item::Image { x, y } => {
                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new(
                        "cm",
                        vec![100.into(), 0.into(), 0.into(), 50.into(), x.into(), y.into()],
                    ));
                    operations.push(Operation::new("Do", vec!["Im1".into()]));
                    operations.push(Operation::new("Q", vec![]));
                }
            }
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = info_title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("pdf saves");
    bytes
}

/// A three-page design document with a decorative banner, three heading
/// levels and body text.
pub fn design_document() -> Vec<u8> {
    build_pdf(
        vec![
            vec![
                bold(24, 760, "Design"),
                bold(24, 730, "Document"),
                regular(10, 700, "Prepared by the platform team"),
            ],
            vec![
                bold(40, 800, "DRAFT"),
                bold(18, 740, "1. Introduction"),
                regular(10, 715, "This document describes the system."),
                bold(14, 690, "1.1 Purpose"),
                regular(10, 670, "The purpose is stated here."),
                bold(12, 650, "1.1.1 Scope"),
                regular(10, 630, "Scope covers the core services."),
            ],
            vec![
                bold(18, 740, "2. Requirements"),
                regular(10, 715, "Requirements follow."),
                bold(14, 690, "2.1 Functional"),
                regular(10, 670, "Functional requirements are listed."),
                Item::Image { x: 72, y: 300 },
            ],
        ],
        Some("Design Document v2"),
    )
}
