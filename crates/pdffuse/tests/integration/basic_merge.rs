//! End-to-end merge behavior: ordering, statistics, output validity.

use crate::common::{page_count, page_markers, source, source_with_range};
use pdffuse::merge::{MergeOptions, Merger, MERGED_FILENAME};

#[tokio::test]
async fn merge_two_documents_appends_in_file_order() {
    let files = vec![source("a.pdf", 2), source("b.pdf", 3)];

    let output = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap();

    assert_eq!(output.total_pages(), 5);
    assert_eq!(
        page_markers(&output.bytes),
        vec!["a-1", "a-2", "b-1", "b-2", "b-3"]
    );
}

#[tokio::test]
async fn merge_single_document() {
    let files = vec![source("only.pdf", 3)];

    let output = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap();

    assert_eq!(output.total_pages(), 3);
    assert_eq!(page_markers(&output.bytes), vec!["only-1", "only-2", "only-3"]);
}

#[tokio::test]
async fn merge_order_invariant_with_ranges() {
    // Files [A, B] with ranges ["2-3", "1"]: output must be A[1], A[2], B[0].
    let files = vec![
        source_with_range("a.pdf", 5, "2-3"),
        source_with_range("b.pdf", 5, "1"),
    ];
    let options = MergeOptions {
        use_page_range: true,
        ..Default::default()
    };

    let output = Merger::new().merge(&files, &options).await.unwrap();

    assert_eq!(page_markers(&output.bytes), vec!["a-2", "a-3", "b-1"]);
}

#[tokio::test]
async fn within_file_order_is_ascending_regardless_of_token_order() {
    let files = vec![source_with_range("a.pdf", 6, "5-6,1-2")];
    let options = MergeOptions {
        use_page_range: true,
        ..Default::default()
    };

    let output = Merger::new().merge(&files, &options).await.unwrap();

    assert_eq!(
        page_markers(&output.bytes),
        vec!["a-1", "a-2", "a-5", "a-6"]
    );
}

#[tokio::test]
async fn merge_output_is_a_loadable_pdf() {
    let files = vec![source("a.pdf", 1), source("b.pdf", 1)];

    let output = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap();

    assert!(output.bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&output.bytes), 2);
}

#[tokio::test]
async fn merge_statistics_are_populated() {
    let files = vec![source("a.pdf", 2), source("b.pdf", 1)];

    let output = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap();

    let stats = &output.statistics;
    assert_eq!(stats.files_merged, 2);
    assert_eq!(stats.files_skipped, 0);
    assert_eq!(stats.total_pages, 3);
    assert!(stats.input_size > 0);
}

#[tokio::test]
async fn inert_flags_do_not_change_output() {
    let files = vec![source("a.pdf", 2)];

    let plain = Merger::new()
        .merge(&files, &MergeOptions::default())
        .await
        .unwrap();
    let flagged = Merger::new()
        .merge(
            &files,
            &MergeOptions {
                keep_bookmarks: true,
                optimize_for_print: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(plain.total_pages(), flagged.total_pages());
    assert_eq!(page_markers(&plain.bytes), page_markers(&flagged.bytes));
}

#[test]
fn suggested_output_name() {
    assert_eq!(MERGED_FILENAME, "merged.pdf");
}
