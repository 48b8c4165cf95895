//! Command-dialect parsing and script-driven merges.

use crate::common::{page_markers, source};
use pdffuse::command::{parse_commands, CommandError};
use pdffuse::merge::Merger;
use pdffuse::MergeError;

#[test]
fn script_with_flags_and_two_files() {
    let parsed = parse_commands("1:1-5\n2:all\n--keep-bookmarks", 2);

    assert!(parsed.is_valid());
    assert_eq!(parsed.commands.len(), 2);
    assert_eq!(parsed.commands[0].file_index, 1);
    assert_eq!(parsed.commands[0].page_range, "1-5");
    assert_eq!(parsed.commands[1].page_range, "all");
    assert!(parsed.options.keep_bookmarks);
    assert!(!parsed.options.print_mode);
}

#[test]
fn out_of_bounds_file_reference_is_collected() {
    let parsed = parse_commands("3:1-5", 2);

    assert!(parsed.commands.is_empty());
    assert_eq!(parsed.errors.len(), 1);
    assert!(matches!(
        parsed.errors[0],
        CommandError::UnknownFileReference {
            index: 3,
            file_count: 2
        }
    ));
}

#[test]
fn strict_dialect_rejects_what_simple_dialect_drops() {
    // "abc" resolves to nothing in the simple dialect; here it is an error.
    let parsed = parse_commands("1:abc", 1);
    assert_eq!(parsed.errors.len(), 1);
    assert!(matches!(parsed.errors[0], CommandError::InvalidPageToken(_)));
}

#[tokio::test]
async fn script_controls_order_across_files() {
    let files = vec![source("a.pdf", 2), source("b.pdf", 2)];
    let parsed = parse_commands("2:all\n1:2", 2);

    let output = Merger::new().merge_script(&files, &parsed).await.unwrap();

    assert_eq!(page_markers(&output.bytes), vec!["b-1", "b-2", "a-2"]);
}

#[tokio::test]
async fn script_may_reuse_a_file() {
    let files = vec![source("a.pdf", 3), source("b.pdf", 1)];
    let parsed = parse_commands("1:1\n2:all\n1:3", 2);

    let output = Merger::new().merge_script(&files, &parsed).await.unwrap();

    assert_eq!(page_markers(&output.bytes), vec!["a-1", "b-1", "a-3"]);
}

#[tokio::test]
async fn invalid_script_aborts_merge_with_collected_errors() {
    let files = vec![source("a.pdf", 2)];
    let parsed = parse_commands("1:1\nbogus line\n--what", 1);

    let err = Merger::new()
        .merge_script(&files, &parsed)
        .await
        .unwrap_err();

    match err {
        MergeError::InvalidCommands { errors } => assert_eq!(errors.len(), 2),
        other => panic!("expected InvalidCommands, got {other}"),
    }
}

#[tokio::test]
async fn script_resolving_no_pages_fails_empty_output() {
    let files = vec![source("a.pdf", 2)];
    let parsed = parse_commands("1:9-12", 1);

    let err = Merger::new()
        .merge_script(&files, &parsed)
        .await
        .unwrap_err();
    assert!(matches!(err, MergeError::NoPagesToMerge));
}
