//! Error types for relayout library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for relayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing an uploaded document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The upload was refused before any extraction work started.
    #[error("{0}")]
    InputRejected(RejectReason),

    /// The external parser or converter failed.
    #[error("Failed to extract text from document: {0}")]
    ExtractionFailed(String),

    /// Extraction succeeded but produced no non-whitespace text.
    #[error("No text could be extracted from the document")]
    EmptyResult,

    /// The persistence collaborator refused the record.
    #[error("Failed to store document: {0}")]
    Persistence(String),

    /// Error serializing output (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if the upload was rejected by the input gate.
    pub fn is_input_rejected(&self) -> bool {
        matches!(self, Error::InputRejected(_))
    }

    /// Check if the collaborator failed to extract the document.
    pub fn is_extraction_failed(&self) -> bool {
        matches!(self, Error::ExtractionFailed(_))
    }

    /// Check if the document was readable but contentless.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptyResult)
    }
}

/// Why an upload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Upload exceeds the size ceiling.
    TooLarge {
        /// Upload size in bytes
        size: usize,
        /// Configured ceiling in bytes
        limit: usize,
    },

    /// Legacy binary Word document (`application/msword`).
    LegacyWordFormat,

    /// Any other MIME type outside the allow-list.
    UnsupportedMimeType(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooLarge { limit, .. } => {
                write!(f, "File size must be less than {}", format_limit(*limit))
            }
            RejectReason::LegacyWordFormat => write!(
                f,
                "Legacy .doc files are not supported - please convert to .docx first"
            ),
            RejectReason::UnsupportedMimeType(mime) => write!(
                f,
                "Only PDF and DOCX documents are allowed (got \"{}\")",
                mime
            ),
        }
    }
}

/// Format a byte ceiling for messages ("5 MB" for whole mebibytes).
fn format_limit(limit: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if limit >= MIB && limit % MIB == 0 {
        format!("{} MB", limit / MIB)
    } else {
        format!("{} bytes", limit)
    }
}
