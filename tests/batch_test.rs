//! Integration tests for directory batch processing.

mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{bold, build_pdf, design_document, regular};
use pdfoutline::render::{to_json, JsonFormat};
use pdfoutline::{extract_outline_file, BatchProcessor, OutlineResult, ReportStatus};

fn memo() -> Vec<u8> {
    build_pdf(
        vec![
            vec![bold(22, 700, "Team Memo")],
            vec![
                bold(15, 700, "Action Items"),
                regular(10, 680, "Review the budget draft."),
            ],
        ],
        None,
    )
}

#[test]
fn test_batch_writes_json_per_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("design.pdf"), design_document()).unwrap();
    fs::write(input.join("memo.PDF"), memo()).unwrap();
    fs::write(input.join("notes.txt"), b"ignored").unwrap();

    let summary = BatchProcessor::new(&input, &output).run().unwrap();
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 0);

    // Reports are in input order
    assert_eq!(summary.reports[0].input, input.join("design.pdf"));
    assert_eq!(summary.reports[0].status, ReportStatus::Ok { headings: 5 });
    assert_eq!(summary.reports[1].output, output.join("memo.json"));

    let written = fs::read_to_string(output.join("design.json")).unwrap();
    let expected = to_json(
        &extract_outline_file(input.join("design.pdf")).unwrap(),
        JsonFormat::Pretty,
    )
    .unwrap();
    assert_eq!(written, expected);

    let memo: OutlineResult =
        serde_json::from_str(&fs::read_to_string(output.join("memo.json")).unwrap()).unwrap();
    assert_eq!(memo.title, "Team Memo");
    assert_eq!(memo.outline[0].text, "Action Items");
    assert!(!output.join("notes.json").exists());
}

#[test]
fn test_batch_continues_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a_broken.pdf"), b"this is not a pdf").unwrap();
    fs::write(input.join("b_memo.pdf"), memo()).unwrap();

    let seen = AtomicUsize::new(0);
    let summary = BatchProcessor::new(&input, &output)
        .with_json_format(JsonFormat::Compact)
        .run_with_progress(|_| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    assert!(matches!(
        summary.reports[0].status,
        ReportStatus::Failed { .. }
    ));
    assert!(!output.join("a_broken.json").exists());

    let compact = fs::read_to_string(output.join("b_memo.json")).unwrap();
    assert!(!compact.contains('\n'));
}

#[test]
fn test_batch_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let summary = BatchProcessor::new(dir.path(), dir.path().join("out"))
        .run()
        .unwrap();
    assert_eq!(summary.total(), 0);
    assert!(dir.path().join("out").is_dir());
}
