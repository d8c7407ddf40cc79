//! Directory batch processing.
//!
//! Every `*.pdf` directly inside an input directory is outlined and written
//! as `<stem>.json` to an output directory. A document that fails is
//! reported and skipped; the rest of the batch still runs.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::render::{to_json, JsonFormat};
use crate::Outliner;

/// Outcome of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// Outline written with this many headings
    Ok { headings: usize },
    /// Processing failed
    Failed { error: String },
}

/// Per-document batch report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Input PDF path
    pub input: PathBuf,
    /// Output JSON path
    pub output: PathBuf,
    /// What happened
    pub status: ReportStatus,
}

impl DocumentReport {
    /// Whether the document was written.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, ReportStatus::Ok { .. })
    }
}

/// Reports of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// One report per input
    pub reports: Vec<DocumentReport>,
}

impl BatchSummary {
    /// Number of documents written.
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_ok()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    /// Total documents processed.
    pub fn total(&self) -> usize {
        self.reports.len()
    }
}

/// Outlines every PDF in a directory.
pub struct BatchProcessor {
    input_dir: PathBuf,
    output_dir: PathBuf,
    outliner: Outliner,
    json_format: JsonFormat,
}

impl BatchProcessor {
    /// Create a processor reading from `input_dir` and writing to `output_dir`.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            outliner: Outliner::new(),
            json_format: JsonFormat::Pretty,
        }
    }

    /// Use a configured outliner.
    pub fn with_options(mut self, outliner: Outliner) -> Self {
        self.outliner = outliner;
        self
    }

    /// Set the JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// PDF files directly inside the input directory, sorted by name.
    pub fn inputs(&self) -> Result<Vec<PathBuf>> {
        let mut inputs: Vec<PathBuf> = fs::read_dir(&self.input_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_pdf_extension(path))
            .collect();
        inputs.sort();
        Ok(inputs)
    }

    /// Process the whole directory.
    pub fn run(&self) -> Result<BatchSummary> {
        self.run_with_progress(|_| {})
    }

    /// Process the whole directory, calling `progress` after each document.
    ///
    /// The callback runs on rayon worker threads in completion order.
    pub fn run_with_progress<F>(&self, progress: F) -> Result<BatchSummary>
    where
        F: Fn(&DocumentReport) + Sync,
    {
        let inputs = self.inputs()?;
        fs::create_dir_all(&self.output_dir)?;

        log::info!(
            "Processing {} documents from {}",
            inputs.len(),
            self.input_dir.display()
        );

        let reports: Vec<DocumentReport> = inputs
            .par_iter()
            .map(|input| {
                let report = self.process(input);
                progress(&report);
                report
            })
            .collect();

        Ok(BatchSummary { reports })
    }

    /// Output path for an input file.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        self.output_dir.join(format!("{}.json", stem))
    }

    fn process(&self, input: &Path) -> DocumentReport {
        let output = self.output_path(input);
        let status = match self.write_outline(input, &output) {
            Ok(headings) => ReportStatus::Ok { headings },
            Err(e) => {
                log::warn!("Failed to process {}: {}", input.display(), e);
                ReportStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        DocumentReport {
            input: input.to_path_buf(),
            output,
            status,
        }
    }

    fn write_outline(&self, input: &Path, output: &Path) -> Result<usize> {
        let result = self.outliner.outline_file(input)?;
        let json = to_json(&result, self.json_format)?;
        fs::write(output, json)?;
        log::debug!("{} -> {}", input.display(), output.display());
        Ok(result.heading_count())
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
