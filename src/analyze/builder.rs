//! Outline construction from a style map.

use regex::Regex;

use crate::model::{Document, Line, OutlineEntry};

use super::merge::continuation_rule;
use super::style::{BoldDetection, StyleKey, StyleMap};
use super::OutlineOptions;

/// Walks a document in reading order and emits headings for lines set in a
/// heading style.
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    bold: BoldDetection,
    min_line_chars: usize,
    merge_split_headings: bool,
    whitespace: Regex,
}

impl OutlineBuilder {
    /// Create a builder from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            bold: options.bold_detection,
            min_line_chars: options.min_line_chars,
            merge_split_headings: options.merge_split_headings,
            whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    /// Normalized text of a line: stripped span texts joined by single
    /// spaces, whitespace runs collapsed.
    pub fn line_text(&self, line: &Line) -> String {
        let joined = line
            .spans
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        self.whitespace
            .replace_all(joined.trim(), " ")
            .into_owned()
    }

    /// Build the outline of a document.
    pub fn build(&self, doc: &Document, style_map: &StyleMap) -> Vec<OutlineEntry> {
        let mut outline: Vec<OutlineEntry> = Vec::new();
        if style_map.is_empty() {
            return outline;
        }

        for (index, page) in doc.pages.iter().enumerate() {
            let page_num = index as u32 + 1;

            for line in page.text_blocks().flat_map(|b| b.lines.iter()) {
                let Some(first) = line.first_span() else {
                    continue;
                };

                let text = self.line_text(line);
                if text.chars().count() < self.min_line_chars {
                    continue;
                }

                let key = StyleKey::of_span(first, self.bold);
                let Some(level) = style_map.level(&key) else {
                    continue;
                };

                if self.merge_split_headings {
                    if let Some(rule) = continuation_rule(&text, outline.last()) {
                        if let Some(previous) = outline.last_mut() {
                            log::debug!(
                                "Merging {:?} into {:?} (rule {:?})",
                                text,
                                previous.text,
                                rule.trigger
                            );
                            previous.text.push_str(&text);
                        }
                        continue;
                    }
                }

                if outline.last().is_some_and(|prev| prev.text == text) {
                    log::debug!("Skipping repeated heading {:?} on page {}", text, page_num);
                    continue;
                }

                outline.push(OutlineEntry::new(level, text, page_num));
            }
        }

        outline
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(&OutlineOptions::default())
    }
}
