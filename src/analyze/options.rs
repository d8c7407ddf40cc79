//! Outline inference options.

use super::style::BoldDetection;

/// Options controlling style profiling and outline construction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// How bold fonts are recognized
    pub bold_detection: BoldDetection,

    /// Minimum stripped length of a span counted in the style histogram
    pub min_span_chars: usize,

    /// Minimum normalized length of a heading line
    pub min_line_chars: usize,

    /// Discard the largest body style when more than two styles exist
    pub reject_largest_style: bool,

    /// Number of heading levels to assign (1-3)
    pub max_levels: usize,

    /// Apply the split-heading repair rules
    pub merge_split_headings: bool,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat "black" and "heavy" faces as bold too.
    pub fn extended_bold(mut self) -> Self {
        self.bold_detection = BoldDetection::FontNameExtended;
        self
    }

    /// Set the minimum heading line length.
    pub fn with_min_line_chars(mut self, chars: usize) -> Self {
        self.min_line_chars = chars;
        self
    }

    /// Enable or disable outlier rejection of the largest style.
    pub fn with_reject_largest_style(mut self, reject: bool) -> Self {
        self.reject_largest_style = reject;
        self
    }

    /// Set the number of heading levels (clamped to 1-3).
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels.clamp(1, 3);
        self
    }

    /// Enable or disable split-heading repair.
    pub fn with_merge_split_headings(mut self, merge: bool) -> Self {
        self.merge_split_headings = merge;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            bold_detection: BoldDetection::FontName,
            min_span_chars: 2,
            min_line_chars: 3,
            reject_largest_style: true,
            max_levels: 3,
            merge_split_headings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_options_builder() {
        let options = OutlineOptions::new()
            .extended_bold()
            .with_min_line_chars(4)
            .with_reject_largest_style(false)
            .with_max_levels(7);

        assert_eq!(options.bold_detection, BoldDetection::FontNameExtended);
        assert_eq!(options.min_line_chars, 4);
        assert!(!options.reject_largest_style);
        assert_eq!(options.max_levels, 3);
    }

    #[test]
    fn test_default_options() {
        let options = OutlineOptions::default();
        assert_eq!(options.bold_detection, BoldDetection::FontName);
        assert_eq!(options.min_span_chars, 2);
        assert_eq!(options.min_line_chars, 3);
        assert!(options.reject_largest_style);
        assert!(options.merge_split_headings);
    }
}
