//! Line and span types.

use serde::{Deserialize, Serialize};

/// A contiguous run of text rendered in one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font size in points, as reported by the source
    pub size: f64,

    /// Font name or descriptor (e.g., "Helvetica-Bold")
    pub font: String,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f64, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
        }
    }

    /// Length of the stripped text in characters.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// One visual text line: spans in left-to-right reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The spans in this line
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a line holding a single span.
    pub fn single(text: impl Into<String>, size: f64, font: impl Into<String>) -> Self {
        Self::new(vec![Span::new(text, size, font)])
    }

    /// The leading span, which carries the line's style.
    pub fn first_span(&self) -> Option<&Span> {
        self.spans.first()
    }

    /// Check if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

}
