//! Upload format detection and the input gate.
//!
//! Only two declared MIME types are accepted. Size and type are checked here,
//! before any collaborator is invoked.

use crate::error::{Error, RejectReason, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MIME type for PDF uploads.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type for DOCX uploads.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of the legacy binary Word format, rejected with a dedicated message.
pub const LEGACY_DOC_MIME: &str = "application/msword";

/// Default upload ceiling: 5 MiB.
pub const MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Kind of document accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
}

impl DocumentKind {
    /// All accepted kinds.
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Pdf, DocumentKind::Docx];

    /// Resolve a declared MIME type. Only exact matches are accepted.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(DocumentKind::Pdf),
            DOCX_MIME => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Guess the kind from a file extension (`pdf`, `docx`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Guess the kind from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// The canonical MIME type for this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Docx => DOCX_MIME,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::Docx => write!(f, "DOCX"),
        }
    }
}

/// Validate an upload against the size ceiling and the MIME allow-list.
///
/// Size is checked before type. Nothing here touches the content bytes, so a
/// zero-byte upload is left for the collaborator to fail on.
///
/// # Example
/// ```
/// use relayout::detect::{validate_upload, DocumentKind, MAX_INPUT_BYTES, PDF_MIME};
///
/// let kind = validate_upload(PDF_MIME, 1024, MAX_INPUT_BYTES).unwrap();
/// assert_eq!(kind, DocumentKind::Pdf);
/// ```
pub fn validate_upload(mime: &str, size: usize, limit: usize) -> Result<DocumentKind> {
    if size > limit {
        return Err(Error::InputRejected(RejectReason::TooLarge { size, limit }));
    }

    if mime == LEGACY_DOC_MIME {
        return Err(Error::InputRejected(RejectReason::LegacyWordFormat));
    }

    DocumentKind::from_mime(mime)
        .ok_or_else(|| Error::InputRejected(RejectReason::UnsupportedMimeType(mime.to_string())))
}

/// Check if a declared MIME type is accepted.
pub fn is_supported_mime(mime: &str) -> bool {
    DocumentKind::from_mime(mime).is_some()
}
