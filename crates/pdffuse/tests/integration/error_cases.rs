//! Failure-path behavior: every abort is descriptive and returns no bytes.

use crate::common::{encrypted_pdf_bytes, source, source_with_range};
use pdffuse::io::SourceFile;
use pdffuse::merge::{MergeOptions, Merger};
use pdffuse::MergeError;

#[tokio::test]
async fn empty_batch_fails_with_empty_input() {
    let err = Merger::new()
        .merge(&[], &MergeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::NoFilesToMerge));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn all_empty_ranges_fail_with_empty_output() {
    let files = vec![
        source_with_range("a.pdf", 3, "10-20"),
        source_with_range("b.pdf", 2, "99"),
    ];
    let options = MergeOptions {
        use_page_range: true,
        ..Default::default()
    };

    let err = Merger::new().merge(&files, &options).await.unwrap_err();

    assert!(matches!(err, MergeError::NoPagesToMerge));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn skipped_file_does_not_fail_merge_when_others_contribute() {
    let files = vec![
        source_with_range("a.pdf", 3, "99"),
        source_with_range("b.pdf", 2, "all"),
    ];
    let options = MergeOptions {
        use_page_range: true,
        ..Default::default()
    };

    let output = Merger::new().merge(&files, &options).await.unwrap();
    assert_eq!(output.total_pages(), 2);
}

#[tokio::test]
async fn corrupt_file_aborts_and_is_named() {
    let files = vec![
        source("good.pdf", 2),
        SourceFile::new("broken.pdf", b"%PDF-1.5 but then nonsense".to_vec()),
        source("other.pdf", 2),
    ];

    let err = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::FailedToLoadPdf { .. }));
    assert!(format!("{err}").contains("broken.pdf"));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn encrypted_file_aborts_merge() {
    let files = vec![
        source("plain.pdf", 2),
        SourceFile::new("locked.pdf", encrypted_pdf_bytes()),
    ];

    let err = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::EncryptedPdf { .. }));
    assert!(format!("{err}").contains("locked.pdf"));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn empty_buffer_reported_as_corrupted() {
    let files = vec![SourceFile::new("zero.pdf", Vec::new())];

    let err = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::CorruptedPdf { .. }));
    assert!(format!("{err}").contains("zero.pdf"));
}

#[test]
fn internal_failures_are_500_class() {
    assert_eq!(MergeError::merge_failed("boom").status_code(), 500);
    assert_eq!(MergeError::other("boom").status_code(), 500);
}
