//! pdffuse - merge PDF byte buffers with per-file page-range selection.
//!
//! This library takes an ordered batch of in-memory PDF buffers, resolves
//! each file's page-range expression against its actual page count, and
//! produces one merged document. It provides:
//!
//! - A lenient per-file range dialect (`"all"`, `"1-5"`, `"1,3,7-10"`)
//! - A strict newline-separated command dialect (`"2:1-5"`, `"--print"`)
//!   with collected, non-throwing error reporting
//! - Order-preserving merge execution with concurrent input parsing
//! - An inspection adapter reporting page count and encryption status
//!
//! Transport concerns (HTTP, multipart, file I/O) stay outside; callers
//! hand in bytes and get bytes back.
//!
//! # Examples
//!
//! ## Basic merge
//!
//! ```no_run
//! use pdffuse::io::SourceFile;
//! use pdffuse::merge::{MergeOptions, Merger};
//!
//! # async fn example(first: Vec<u8>, second: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let files = vec![
//!     SourceFile::with_range("report.pdf", first, "1-5"),
//!     SourceFile::new("appendix.pdf", second),
//! ];
//!
//! let options = MergeOptions {
//!     use_page_range: true,
//!     ..Default::default()
//! };
//!
//! let output = Merger::new().merge(&files, &options).await?;
//! println!("merged into {} pages", output.total_pages());
//! # Ok(())
//! # }
//! ```
//!
//! ## Command script
//!
//! ```no_run
//! use pdffuse::command::parse_commands;
//! use pdffuse::io::SourceFile;
//! use pdffuse::merge::Merger;
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let files = vec![
//!     SourceFile::new("a.pdf", a),
//!     SourceFile::new("b.pdf", b),
//! ];
//!
//! let parsed = parse_commands("2:all\n1:1-3", files.len());
//! if !parsed.is_valid() {
//!     for err in &parsed.errors {
//!         eprintln!("script error: {err}");
//!     }
//!     return Ok(());
//! }
//!
//! let output = Merger::new().merge_script(&files, &parsed).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod error;
pub mod io;
pub mod merge;
pub mod range;
pub mod validation;

// Re-export commonly used types
pub use error::{MergeError, Result};
pub use io::SourceFile;
pub use merge::{MergeOptions, MergeOutput, Merger};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
