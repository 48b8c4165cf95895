//! Loading PDF byte buffers into documents.
//!
//! Inputs arrive from the transport layer as in-memory buffers, so loading
//! here means parsing bytes with lopdf, not touching the filesystem.
//! Batches may load concurrently; results are always returned in batch
//! order so the append phase of a merge can stay strictly ordered.

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::error::{MergeError, Result};

/// One entry of an ordered merge batch, as delivered by the transport layer.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original file name, used in error messages and reports.
    pub name: String,

    /// Raw PDF content.
    pub bytes: Vec<u8>,

    /// Declared page-range expression, if the uploader supplied one.
    pub page_range: Option<String>,
}

impl SourceFile {
    /// Create a source file without a declared page range.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            page_range: None,
        }
    }

    /// Create a source file with a declared page range.
    pub fn with_range(name: impl Into<String>, bytes: Vec<u8>, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            page_range: Some(range.into()),
        }
    }
}

/// A parsed PDF document with its batch metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The parsed document.
    pub document: Document,

    /// Name of the source file.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Size of the source buffer in bytes.
    pub file_size: u64,

    /// Time taken to parse the buffer.
    pub load_time: Duration,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully parsed.
    pub success_count: usize,

    /// Number of PDFs that failed to parse.
    pub failure_count: usize,

    /// Wall-clock time for the whole batch.
    pub total_time: Duration,

    /// Total size of successfully parsed buffers.
    pub total_size: u64,

    /// Total number of pages parsed.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut success_count = 0;
        let mut failure_count = 0;
        let mut total_size = 0;
        let mut total_pages = 0;

        for result in results {
            match result {
                Ok(loaded) => {
                    success_count += 1;
                    total_size += loaded.file_size;
                    total_pages += loaded.page_count;
                }
                Err(_) => failure_count += 1,
            }
        }

        Self {
            success_count,
            failure_count,
            total_time,
            total_size,
            total_pages,
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Parser for PDF byte buffers.
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    /// Create a new loader.
    pub fn new() -> Self {
        Self
    }

    /// Parse a single buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer is empty or not a valid PDF (`CorruptedPdf` /
    ///   `FailedToLoadPdf`, naming the file)
    /// - The PDF is password-protected (`EncryptedPdf`)
    ///
    /// A zero-page document is *not* an error here; it simply contributes
    /// no pages to a merge.
    pub async fn load(&self, file: &SourceFile) -> Result<LoadedPdf> {
        let start = Instant::now();

        if file.bytes.is_empty() {
            return Err(MergeError::corrupted_pdf(&file.name, "File is empty"));
        }

        let doc = Document::load_mem(&file.bytes).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                MergeError::encrypted_pdf(&file.name)
            } else {
                MergeError::failed_to_load_pdf(&file.name, err_msg)
            }
        })?;

        // lopdf parses encrypted documents without complaint; the trailer
        // tells us whether page content would actually be readable.
        if doc.is_encrypted() {
            return Err(MergeError::encrypted_pdf(&file.name));
        }

        let page_count = doc.get_pages().len();
        let load_time = start.elapsed();

        Ok(LoadedPdf {
            document: doc,
            name: file.name.clone(),
            page_count,
            file_size: file.bytes.len() as u64,
            load_time,
        })
    }

    /// Parse buffers one at a time, in batch order.
    pub async fn load_sequential(&self, files: &[SourceFile]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            results.push(self.load(file).await);
        }

        results
    }

    /// Parse buffers concurrently with bounded parallelism.
    ///
    /// Results come back in batch order regardless of completion order.
    pub async fn load_parallel(&self, files: &[SourceFile], workers: usize) -> Vec<LoadResult> {
        use futures::stream::{self, StreamExt};

        let workers = workers.max(1);

        let tasks = files.iter().enumerate().map(|(idx, file)| {
            let loader = self.clone();
            async move { (idx, loader.load(file).await) }
        });

        let mut indexed: Vec<(usize, LoadResult)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        // Restore batch order; the merge append phase depends on it.
        indexed.sort_by_key(|(idx, _)| *idx);

        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Parse a batch, choosing sequential or parallel loading by size.
    pub async fn load_all(
        &self,
        files: &[SourceFile],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = if files.len() <= 3 {
            self.load_sequential(files).await
        } else {
            self.load_parallel(files, max_workers).await
        };

        let total_time = start.elapsed();
        let stats = LoadStatistics::from_results(&results, total_time);

        (results, stats)
    }
}

/// Format file size as human-readable string.
pub(crate) fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
