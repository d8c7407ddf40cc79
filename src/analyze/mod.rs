//! Typography-based outline inference.
//!
//! The pipeline has three independent steps over a read-only [`Document`]:
//!
//! 1. [`extract_title`] reads the largest text on the first page.
//! 2. [`StyleProfiler`] ranks the font styles of the remaining pages and
//!    maps the top of the ranking onto H1-H3.
//! 3. [`OutlineBuilder`] walks every line and keeps the ones whose leading
//!    span uses a heading style.

mod builder;
mod merge;
mod options;
mod style;
mod title;

pub use builder::OutlineBuilder;
pub use merge::{continuation_rule, SplitHeadingRule, SPLIT_HEADING_RULES};
pub use options::OutlineOptions;
pub use style::{round_size, BoldDetection, StyleKey, StyleMap, StyleProfile, StyleProfiler};
pub use title::{extract_title, title_from_page, UNTITLED};

use crate::model::{Document, OutlineResult};

/// Runs title extraction, style profiling and outline building.
#[derive(Debug, Clone)]
pub struct OutlinePipeline {
    options: OutlineOptions,
    profiler: StyleProfiler,
    builder: OutlineBuilder,
}

impl OutlinePipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            profiler: StyleProfiler::new(&options),
            builder: OutlineBuilder::new(&options),
            options,
        }
    }

    /// Options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Style statistics of a document.
    pub fn profile(&self, doc: &Document) -> StyleProfile {
        self.profiler.profile(doc)
    }

    /// Infer the title and outline of a document.
    pub fn run(&self, doc: &Document) -> OutlineResult {
        let title = extract_title(doc);
        let style_map = self.profiler.style_map(doc);
        let outline = self.builder.build(doc, &style_map);

        log::debug!(
            "Title {:?}, {} heading styles, {} headings",
            title,
            style_map.len(),
            outline.len()
        );

        OutlineResult::new(title, outline)
    }
}

impl Default for OutlinePipeline {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}
