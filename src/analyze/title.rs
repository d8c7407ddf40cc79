//! Title detection on the first page.

use crate::model::{Document, Page};

use super::style::round_size;

/// Title used when the first page has no text.
pub const UNTITLED: &str = "Untitled";

/// Extract the document title from its first page.
///
/// The title is every fragment set in the largest (rounded) font size on
/// page one, line by line, joined with single spaces.
pub fn extract_title(doc: &Document) -> String {
    match doc.first_page() {
        Some(page) => title_from_page(page),
        None => UNTITLED.to_string(),
    }
}

/// Extract a title from a single page.
pub fn title_from_page(page: &Page) -> String {
    let max_size = page
        .text_spans()
        .map(|s| round_size(s.size))
        .max()
        .unwrap_or(0);

    if max_size <= 0 {
        return UNTITLED.to_string();
    }

    let parts: Vec<String> = page
        .text_blocks()
        .flat_map(|b| b.lines.iter())
        .filter_map(|line| {
            let fragment: String = line
                .spans
                .iter()
                .filter(|s| round_size(s.size) == max_size)
                .map(|s| s.text.as_str())
                .collect();
            let fragment = fragment.trim();
            (!fragment.is_empty()).then(|| fragment.to_string())
        })
        .collect();

    parts.join(" ").replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Line, Span};

    #[test]
    fn test_no_text_blocks_is_untitled() {
        let page = Page::letter().with_block(Block::image());
        assert_eq!(title_from_page(&page), UNTITLED);
        assert_eq!(extract_title(&Document::new()), UNTITLED);
    }

    #[test]
    fn test_joins_max_size_fragments_across_lines() {
        let page = Page::letter()
            .with_block(Block::text(vec![
                Line::new(vec![
                    Span::new("Annual ", 24.2, "Arial-Bold"),
                    Span::new("Report", 23.8, "Arial-Bold"),
                ]),
                Line::single("Prepared by the board", 12.0, "Arial"),
            ]))
            .with_block(Block::text(vec![Line::single(" 2024\n", 24.0, "Arial-Bold")]));

        assert_eq!(title_from_page(&page), "Annual Report 2024");
    }

    #[test]
    fn test_mixed_line_keeps_only_max_size_spans() {
        let page = Page::letter().with_block(Block::text(vec![Line::new(vec![
            Span::new("1", 9.0, "Arial"),
            Span::new("Overview", 20.0, "Arial"),
            Span::new(" of", 20.0, "Arial"),
        ])]));
        assert_eq!(title_from_page(&page), "Overview of");
    }

    #[test]
    fn test_embedded_newlines_become_spaces() {
        let page = Page::letter().with_block(Block::text(vec![Line::single(
            "RFP:\nDigital Library",
            18.0,
            "Arial",
        )]));
        assert_eq!(title_from_page(&page), "RFP: Digital Library");
    }

    #[test]
    fn test_only_first_page_counts() {
        let doc = Document::from_pages(vec![
            Page::letter().with_block(Block::text(vec![Line::single("Small Cover", 12.0, "Arial")])),
            Page::letter().with_block(Block::text(vec![Line::single("Huge", 48.0, "Arial")])),
        ]);
        assert_eq!(extract_title(&doc), "Small Cover");
    }

    #[test]
    fn test_lines_without_spans_are_untitled() {
        let page = Page::letter()
            .with_block(Block::text(vec![Line::new(vec![]), Line::default()]))
            .with_block(Block::text(vec![]));
        assert_eq!(title_from_page(&page), UNTITLED);
    }

    #[test]
    fn test_sizes_just_below_half_join_title() {
        let page = Page::letter().with_block(Block::text(vec![
            Line::single("Big Title", 13.4999999, "Arial-Bold"),
            Line::single("Small Sub", 13.2, "Arial-Bold"),
        ]));
        assert_eq!(title_from_page(&page), "Big Title Small Sub");
    }
}
