//! Font style statistics and the style-to-level mapping.
//!
//! Styles are compared by `(rounded size, bold)` only. The profiler counts
//! how often each style occurs on the body pages (everything after the
//! title page), ranks the distinct styles from largest to smallest and maps
//! the top of that ranking onto H1-H3.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Document, HeadingLevel, Page, Span};

use super::OutlineOptions;

/// Round a font size to the nearest integer point, ties to even.
///
/// Every style key and the title size scan go through this function so
/// that `11.5` and `12.5` both land on `12` consistently.
pub fn round_size(size: f64) -> i32 {
    size.round_ties_even() as i32
}

/// How a font descriptor is classified as bold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoldDetection {
    /// Font name contains "bold" (case-insensitive)
    #[default]
    FontName,
    /// Font name contains "bold", "black" or "heavy" (case-insensitive)
    FontNameExtended,
}

impl BoldDetection {
    /// Check whether a font descriptor denotes a bold face.
    pub fn is_bold(self, font: &str) -> bool {
        let font = font.to_lowercase();
        match self {
            BoldDetection::FontName => font.contains("bold"),
            BoldDetection::FontNameExtended => {
                font.contains("bold") || font.contains("black") || font.contains("heavy")
            }
        }
    }
}

/// Style identity used for frequency analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StyleKey {
    /// Font size rounded to whole points
    pub size: i32,
    /// Whether the font is bold
    pub bold: bool,
}

impl StyleKey {
    /// Create a style key.
    pub fn new(size: i32, bold: bool) -> Self {
        Self { size, bold }
    }

    /// Style key of a span.
    pub fn of_span(span: &Span, bold: BoldDetection) -> Self {
        Self {
            size: round_size(span.size),
            bold: bold.is_bold(&span.font),
        }
    }

    /// Heading rank order: larger sizes first, bold before regular at
    /// equal size.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| other.bold.cmp(&self.bold))
    }
}

impl std::fmt::Display for StyleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bold {
            write!(f, "{}pt bold", self.size)
        } else {
            write!(f, "{}pt", self.size)
        }
    }
}

/// Mapping from heading styles to levels. Holds at most three entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    levels: BTreeMap<StyleKey, HeadingLevel>,
}

impl StyleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign levels to ranked styles, top rank first.
    pub fn from_ranked(ranked: &[StyleKey], max_levels: usize) -> Self {
        let levels = ranked
            .iter()
            .take(max_levels.clamp(1, HeadingLevel::ALL.len()))
            .enumerate()
            .filter_map(|(rank, key)| HeadingLevel::from_rank(rank).map(|level| (*key, level)))
            .collect();
        Self { levels }
    }

    /// Level for a style, if it is a heading style.
    pub fn level(&self, key: &StyleKey) -> Option<HeadingLevel> {
        self.levels.get(key).copied()
    }

    /// Style mapped to a given level.
    pub fn style_for(&self, level: HeadingLevel) -> Option<StyleKey> {
        self.levels
            .iter()
            .find(|(_, l)| **l == level)
            .map(|(k, _)| *k)
    }

    /// Number of mapped styles.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if no heading styles were found.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Entries ordered by level (H1 first).
    pub fn entries(&self) -> Vec<(HeadingLevel, StyleKey)> {
        let mut entries: Vec<_> = self.levels.iter().map(|(k, l)| (*l, *k)).collect();
        entries.sort();
        entries
    }
}

/// Style statistics of one document.
#[derive(Debug, Clone, Default)]
pub struct StyleProfile {
    /// Span counts per style on the body pages
    pub histogram: BTreeMap<StyleKey, usize>,
    /// Distinct styles in rank order, before outlier rejection
    pub ranked: Vec<StyleKey>,
    /// Style discarded as a decorative outlier, if any
    pub rejected: Option<StyleKey>,
    /// Resulting heading map
    pub style_map: StyleMap,
}

/// Builds a [`StyleProfile`] from the body pages of a document.
#[derive(Debug, Clone)]
pub struct StyleProfiler {
    bold: BoldDetection,
    min_span_chars: usize,
    reject_largest: bool,
    max_levels: usize,
}

impl StyleProfiler {
    /// Create a profiler from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            bold: options.bold_detection,
            min_span_chars: options.min_span_chars,
            reject_largest: options.reject_largest_style,
            max_levels: options.max_levels,
        }
    }

    /// Count styles of substantial spans on the given pages.
    pub fn histogram(&self, pages: &[Page]) -> BTreeMap<StyleKey, usize> {
        let mut histogram = BTreeMap::new();
        for span in pages.iter().flat_map(|p| p.text_spans()) {
            if span.trimmed_len() < self.min_span_chars {
                continue;
            }
            *histogram.entry(StyleKey::of_span(span, self.bold)).or_insert(0) += 1;
        }
        histogram
    }

    /// Profile a document. The first page is never counted.
    pub fn profile(&self, doc: &Document) -> StyleProfile {
        let histogram = self.histogram(doc.body_pages());
        if histogram.is_empty() {
            log::debug!("No substantial spans after the first page; no heading styles");
            return StyleProfile::default();
        }

        let mut ranked: Vec<StyleKey> = histogram.keys().copied().collect();
        ranked.sort_by(StyleKey::rank_cmp);

        let (rejected, candidates) = if self.reject_largest && ranked.len() > 2 {
            (Some(ranked[0]), &ranked[1..])
        } else {
            (None, &ranked[..])
        };

        if let Some(style) = rejected {
            log::debug!("Discarding largest style {} as outlier", style);
        }

        let style_map = StyleMap::from_ranked(candidates, self.max_levels);
        log::debug!(
            "{} distinct styles, {} heading styles",
            ranked.len(),
            style_map.len()
        );

        StyleProfile {
            histogram,
            ranked,
            rejected,
            style_map,
        }
    }

    /// Build only the style map of a document.
    pub fn style_map(&self, doc: &Document) -> StyleMap {
        self.profile(doc).style_map
    }
}

impl Default for StyleProfiler {
    fn default() -> Self {
        Self::new(&OutlineOptions::default())
    }
}
