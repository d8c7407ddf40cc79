//! Repair rules for headings split across two lines.
//!
//! Each rule is a literal pattern observed in real documents. Other
//! multi-line headings stay as separate entries.

use crate::model::OutlineEntry;

/// A heading fragment that belongs to the previous heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitHeadingRule {
    /// Lowercased text of the orphaned line
    pub trigger: &'static str,
    /// Lowercased substring the previous heading must contain
    pub previous_contains: &'static str,
}

/// Known split-heading patterns.
pub const SPLIT_HEADING_RULES: &[SplitHeadingRule] = &[SplitHeadingRule {
    trigger: "syllabus",
    previous_contains: "overview",
}];

impl SplitHeadingRule {
    /// Check whether `line_text` continues `previous`.
    pub fn matches(&self, line_text: &str, previous: &str) -> bool {
        line_text.to_lowercase() == self.trigger
            && previous.to_lowercase().contains(self.previous_contains)
    }
}

/// Find the rule, if any, that makes `line_text` a continuation of the last
/// outline entry.
pub fn continuation_rule(
    line_text: &str,
    previous: Option<&OutlineEntry>,
) -> Option<&'static SplitHeadingRule> {
    let previous = previous?;
    SPLIT_HEADING_RULES
        .iter()
        .find(|rule| rule.matches(line_text, &previous.text))
}
