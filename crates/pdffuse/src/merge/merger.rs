//! Core merge implementation.

use std::time::{Duration, Instant};

use crate::command::ParsedCommands;
use crate::error::{MergeError, Result};
use crate::io::{LoadedPdf, PdfLoader, SourceFile};
use crate::merge::pages::OutputDocument;
use crate::range::parse_range;

/// Suggested file name for a merge result handed to the transport layer.
pub const MERGED_FILENAME: &str = "merged.pdf";

/// Flags controlling a merge.
///
/// Only `use_page_range` changes behavior. `keep_bookmarks` and
/// `optimize_for_print` are accepted from callers and carried through
/// untouched; bookmark merging and print optimization are not implemented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Honor each file's declared page range. When false, every file
    /// contributes all of its pages.
    pub use_page_range: bool,

    /// Inert pass-through flag.
    pub keep_bookmarks: bool,

    /// Inert pass-through flag.
    pub optimize_for_print: bool,
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Plan entries that contributed at least one page.
    pub files_merged: usize,

    /// Plan entries whose resolved range was empty.
    pub files_skipped: usize,

    /// Total pages in the output document.
    pub total_pages: usize,

    /// Total size of the input buffers.
    pub input_size: u64,

    /// Time spent parsing inputs.
    pub load_time: Duration,

    /// Total time for the merge.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        crate::io::format_file_size(self.input_size)
    }
}

/// Result of a successful merge.
#[derive(Debug)]
pub struct MergeOutput {
    /// Serialized output PDF.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

impl MergeOutput {
    /// Total pages copied into the output.
    pub fn total_pages(&self) -> usize {
        self.statistics.total_pages
    }
}

/// One resolved step of a merge plan: which loaded document, which range.
struct PlanEntry {
    file_index: usize,
    page_range: String,
}

/// PDF merger combining byte-buffer sources into one document.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    loader: PdfLoader,
}

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self {
            loader: PdfLoader::new(),
        }
    }

    /// Merge a batch in file order, one plan entry per file.
    ///
    /// Each file's effective range is its declared range when
    /// `options.use_page_range` is set and a range was supplied, otherwise
    /// `"all"`. Files whose range resolves empty are skipped.
    ///
    /// # Errors
    ///
    /// - `NoFilesToMerge` for an empty batch
    /// - `EncryptedPdf` / `FailedToLoadPdf` / `CorruptedPdf` naming the
    ///   first offending file (any load failure aborts the whole merge)
    /// - `NoPagesToMerge` when no file contributed a page
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdffuse::io::SourceFile;
    /// # use pdffuse::merge::{MergeOptions, Merger};
    /// # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
    /// let files = vec![
    ///     SourceFile::with_range("a.pdf", a, "2-3"),
    ///     SourceFile::with_range("b.pdf", b, "1"),
    /// ];
    /// let options = MergeOptions {
    ///     use_page_range: true,
    ///     ..Default::default()
    /// };
    /// let output = Merger::new().merge(&files, &options).await?;
    /// println!("{} pages", output.total_pages());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, files: &[SourceFile], options: &MergeOptions) -> Result<MergeOutput> {
        let plan: Vec<PlanEntry> = files
            .iter()
            .enumerate()
            .map(|(i, file)| PlanEntry {
                file_index: i,
                page_range: effective_range(file, options).to_string(),
            })
            .collect();

        self.execute(files, plan).await
    }

    /// Merge according to a parsed command script.
    ///
    /// Commands run in script order and may reference any file of the
    /// batch, repeatedly. The whole batch is loaded up front so a load
    /// failure is reported even for files the script never uses.
    ///
    /// # Errors
    ///
    /// `InvalidCommands` if the script carried parse errors, plus
    /// everything [`Merger::merge`] can fail with.
    pub async fn merge_script(
        &self,
        files: &[SourceFile],
        parsed: &ParsedCommands,
    ) -> Result<MergeOutput> {
        if !parsed.is_valid() {
            return Err(MergeError::invalid_commands(parsed.errors.clone()));
        }

        let plan: Vec<PlanEntry> = parsed
            .commands
            .iter()
            .map(|cmd| PlanEntry {
                file_index: cmd.file_index - 1,
                page_range: cmd.page_range.clone(),
            })
            .collect();

        self.execute(files, plan).await
    }

    /// Load the batch, then walk the plan appending pages in order.
    async fn execute(&self, files: &[SourceFile], plan: Vec<PlanEntry>) -> Result<MergeOutput> {
        let merge_start = Instant::now();

        if files.is_empty() {
            return Err(MergeError::NoFilesToMerge);
        }

        // Loads may run concurrently; results come back in batch order and
        // the first failure aborts the merge.
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let (results, load_stats) = self.loader.load_all(files, workers).await;

        let mut loaded: Vec<Option<LoadedPdf>> = Vec::with_capacity(results.len());
        for result in results {
            loaded.push(Some(result?));
        }

        // A plan entry may reference its document more than once (command
        // scripts), so the document is only consumed on last use.
        let mut remaining_uses = vec![0usize; loaded.len()];
        for entry in &plan {
            remaining_uses[entry.file_index] += 1;
        }

        let mut output = OutputDocument::new();
        let mut files_merged = 0;
        let mut files_skipped = 0;

        for entry in &plan {
            let slot = &mut loaded[entry.file_index];
            let page_count = slot
                .as_ref()
                .map(|l| l.page_count)
                .unwrap_or_default();

            let indices = parse_range(&entry.page_range, page_count);
            remaining_uses[entry.file_index] -= 1;

            if indices.is_empty() {
                files_skipped += 1;
                continue;
            }

            let document = if remaining_uses[entry.file_index] == 0 {
                slot.take()
                    .ok_or_else(|| MergeError::merge_failed("plan entry reused consumed document"))?
                    .document
            } else {
                slot.as_ref()
                    .ok_or_else(|| MergeError::merge_failed("plan entry reused consumed document"))?
                    .document
                    .clone()
            };

            output.append_pages(document, &indices)?;
            files_merged += 1;
        }

        if output.page_count() == 0 {
            return Err(MergeError::NoPagesToMerge);
        }

        let total_pages = output.page_count();
        let bytes = output.into_bytes()?;

        Ok(MergeOutput {
            bytes,
            statistics: MergeStatistics {
                files_merged,
                files_skipped,
                total_pages,
                input_size: load_stats.total_size,
                load_time: load_stats.total_time,
                merge_time: merge_start.elapsed(),
            },
        })
    }
}

/// A file's effective range under the given options.
///
/// Missing or blank declared ranges fall back to `"all"`, as does every
/// file when ranges are globally disabled.
fn effective_range<'a>(file: &'a SourceFile, options: &MergeOptions) -> &'a str {
    if !options.use_page_range {
        return "all";
    }

    match file.page_range.as_deref() {
        Some(range) if !range.is_empty() => range,
        _ => "all",
    }
}
