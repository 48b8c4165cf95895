//! Input inspection and pre-merge validation.
//!
//! [`Validator::inspect`] backs the standalone analyze endpoint: it
//! reports a file's page count and encryption status without mutating it,
//! and treats encryption as a reportable property rather than an error.
//! [`Validator::ensure_mergeable`] is the gate the transport layer runs
//! before handing a batch to the merge planner.

use lopdf::Document;
use serde::{Deserialize, Serialize};

use crate::error::{MergeError, Result};
use crate::io::{format_file_size, SourceFile};

/// Report for a single inspected file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Name of the inspected file.
    pub name: String,

    /// Number of pages. Zero when the file is encrypted.
    pub page_count: usize,

    /// Always false: outline introspection is not implemented.
    pub has_bookmarks: bool,

    /// Whether the PDF is password-protected.
    pub is_encrypted: bool,

    /// Size of the buffer in bytes.
    pub file_size: u64,
}

/// Aggregate report for an inspected batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Per-file reports, in batch order.
    pub reports: Vec<FileReport>,

    /// Total pages across all readable files.
    pub total_pages: usize,

    /// Total buffer size in bytes.
    pub total_size: u64,

    /// Number of encrypted files in the batch.
    pub encrypted_count: usize,
}

impl ValidationSummary {
    /// Build a summary from per-file reports.
    pub fn from_reports(reports: Vec<FileReport>) -> Self {
        let total_pages = reports.iter().map(|r| r.page_count).sum();
        let total_size = reports.iter().map(|r| r.file_size).sum();
        let encrypted_count = reports.iter().filter(|r| r.is_encrypted).count();

        Self {
            reports,
            total_pages,
            total_size,
            encrypted_count,
        }
    }

    /// Format the total size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for uploaded PDF buffers.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Inspect a single buffer without mutating it.
    ///
    /// Encryption is reported, not raised: an encrypted file yields
    /// `is_encrypted = true` with a zero page count. `has_bookmarks` is
    /// always false.
    ///
    /// # Errors
    ///
    /// Returns `CorruptedPdf` / `FailedToLoadPdf` when the buffer is not a
    /// PDF at all.
    pub fn inspect(&self, file: &SourceFile) -> Result<FileReport> {
        if file.bytes.is_empty() {
            return Err(MergeError::corrupted_pdf(&file.name, "File is empty"));
        }

        let doc = match Document::load_mem(&file.bytes) {
            Ok(doc) => doc,
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    return Ok(self.encrypted_report(file));
                }
                return Err(MergeError::failed_to_load_pdf(&file.name, err_msg));
            }
        };

        if doc.is_encrypted() {
            return Ok(self.encrypted_report(file));
        }

        Ok(FileReport {
            name: file.name.clone(),
            page_count: doc.get_pages().len(),
            has_bookmarks: false,
            is_encrypted: false,
            file_size: file.bytes.len() as u64,
        })
    }

    fn encrypted_report(&self, file: &SourceFile) -> FileReport {
        FileReport {
            name: file.name.clone(),
            page_count: 0,
            has_bookmarks: false,
            is_encrypted: true,
            file_size: file.bytes.len() as u64,
        }
    }

    /// Inspect every file of a batch.
    ///
    /// # Errors
    ///
    /// `NoFilesToMerge` for an empty batch; otherwise the first
    /// unreadable file's error.
    pub fn inspect_all(&self, files: &[SourceFile]) -> Result<ValidationSummary> {
        if files.is_empty() {
            return Err(MergeError::NoFilesToMerge);
        }

        let mut reports = Vec::with_capacity(files.len());
        for file in files {
            reports.push(self.inspect(file)?);
        }

        Ok(ValidationSummary::from_reports(reports))
    }

    /// Reject batches the merge planner must not see.
    ///
    /// # Errors
    ///
    /// - `NoFilesToMerge` for an empty batch
    /// - `EncryptedPdf` naming the first encrypted file
    /// - the underlying error for unreadable files
    pub fn ensure_mergeable(&self, files: &[SourceFile]) -> Result<()> {
        let summary = self.inspect_all(files)?;

        for report in &summary.reports {
            if report.is_encrypted {
                return Err(MergeError::encrypted_pdf(&report.name));
            }
        }

        Ok(())
    }
}
