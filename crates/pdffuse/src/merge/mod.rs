//! Merge planning and execution.
//!
//! [`Merger`] turns an ordered batch of source files into one output PDF:
//! each file's effective page range is resolved against its actual page
//! count, files resolving to nothing are skipped, and the selected pages
//! are appended in strict plan order. [`pages::OutputDocument`] does the
//! low-level object grafting.

pub mod merger;
pub mod pages;

pub use merger::{MergeOptions, MergeOutput, MergeStatistics, Merger, MERGED_FILENAME};
pub use pages::OutputDocument;
