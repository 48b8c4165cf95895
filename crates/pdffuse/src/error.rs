//! Error types for pdffuse.
//!
//! Every failure surfaces as a [`MergeError`] with a human-readable
//! message naming the offending file where one exists. Two classification
//! helpers serve the two callers: [`MergeError::status_code`] maps an
//! error to an HTTP-style class for a transport layer, and
//! [`MergeError::exit_code`] maps it to a process exit code for the CLI.
//!
//! Command-script problems are the one exception to fail-fast: the script
//! parser collects them (see [`crate::command`]) and the caller wraps the
//! list in [`MergeError::InvalidCommands`] if it decides to abort.

use std::fmt;
use std::io;

use crate::command::CommandError;

/// Result type alias for pdffuse operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Main error type for pdffuse operations.
#[derive(Debug)]
pub enum MergeError {
    /// No files were supplied for merging.
    NoFilesToMerge,

    /// Every file's resolved range was empty; the output would have no pages.
    NoPagesToMerge,

    /// A source PDF is password-protected.
    EncryptedPdf {
        /// Name of the encrypted file.
        name: String,
    },

    /// A source failed to parse as a PDF.
    FailedToLoadPdf {
        /// Name of the file.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A source parsed but its structure is unusable.
    CorruptedPdf {
        /// Name of the file.
        name: String,
        /// Details about the corruption.
        details: String,
    },

    /// A merge script failed validation.
    InvalidCommands {
        /// Problems collected by the script parser.
        errors: Vec<CommandError>,
    },

    /// The merge itself failed after inputs were accepted.
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Generic I/O error.
    Io {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Generic error with a custom message.
    Other {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFilesToMerge => {
                write!(f, "No files uploaded")
            }
            Self::NoPagesToMerge => {
                write!(f, "No pages to merge: every file's page range resolved empty")
            }
            Self::EncryptedPdf { name } => {
                write!(
                    f,
                    "PDF is encrypted and cannot be processed: {name}\n  \
                     Hint: decrypt the PDF first, then upload it again"
                )
            }
            Self::FailedToLoadPdf { name, reason } => {
                write!(f, "Failed to load PDF: {name}\n  Reason: {reason}")
            }
            Self::CorruptedPdf { name, details } => {
                write!(f, "Corrupted or invalid PDF: {name}\n  Details: {details}")
            }
            Self::InvalidCommands { errors } => {
                write!(f, "Merge script has {} error(s):", errors.len())?;
                for err in errors {
                    write!(f, "\n  - {err}")?;
                }
                Ok(())
            }
            Self::MergeFailed { reason } => {
                write!(f, "Merge operation failed: {reason}")
            }
            Self::Io { source } => {
                write!(f, "I/O error: {source}")
            }
            Self::Other { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for MergeError {
    fn from(err: io::Error) -> Self {
        Self::Io { source: err }
    }
}

impl From<lopdf::Error> for MergeError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl MergeError {
    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(name: impl Into<String>) -> Self {
        Self::EncryptedPdf { name: name.into() }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create an InvalidCommands error from collected script problems.
    pub fn invalid_commands(errors: Vec<CommandError>) -> Self {
        Self::InvalidCommands { errors }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// HTTP-style status class for a transport layer.
    ///
    /// Caller-input problems (empty batch, empty output, bad sources, bad
    /// scripts) are 400; everything else is an internal failure, 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoFilesToMerge
            | Self::NoPagesToMerge
            | Self::EncryptedPdf { .. }
            | Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::InvalidCommands { .. } => 400,
            Self::MergeFailed { .. } | Self::Io { .. } | Self::Other { .. } => 500,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoFilesToMerge => 1,
            Self::NoPagesToMerge => 1,
            Self::InvalidCommands { .. } => 1,
            Self::EncryptedPdf { .. } => 3,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::MergeFailed { .. } => 6,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
