//! Output records: the extracted document and its persisted form.

use crate::render::ExtractionStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two artifacts produced for one upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Normalized plain text
    pub text: String,

    /// Structurally formatted HTML
    pub html: String,

    /// Statistics gathered while reconstructing (not part of the output contract)
    #[serde(skip)]
    pub stats: ExtractionStats,
}

impl ExtractedDocument {
    /// Create a new document from its two artifacts.
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
            stats: ExtractionStats::default(),
        }
    }

    /// Attach extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = stats;
        self
    }

    /// Check if the text artifact has no non-whitespace characters.
    pub fn has_no_text(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Record handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Original upload file name
    pub file_name: String,
    /// Object-store path of the uploaded bytes
    pub file_path: String,
    /// Normalized text artifact
    pub extracted_text: String,
    /// HTML artifact
    pub extracted_html: String,
    /// Uploading user
    pub owner_id: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Build the record for an extracted document.
    pub fn new(
        owner_id: impl Into<String>,
        file_name: impl Into<String>,
        document: &ExtractedDocument,
        created_at: DateTime<Utc>,
    ) -> Self {
        let owner_id = owner_id.into();
        let file_name = file_name.into();
        let file_path = storage_path(&owner_id, &file_name, created_at);
        Self {
            file_name,
            file_path,
            extracted_text: document.text.clone(),
            extracted_html: document.html.clone(),
            owner_id,
            created_at,
        }
    }
}

/// Object-store path for an upload: `{owner}/docs/{unix_millis}-{file_name}`.
pub fn storage_path(owner_id: &str, file_name: &str, at: DateTime<Utc>) -> String {
    format!("{}/docs/{}-{}", owner_id, at.timestamp_millis(), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extracted_document_empty_text() {
        assert!(ExtractedDocument::new("  \n\t", "<p>x</p>").has_no_text());
        assert!(!ExtractedDocument::new("a", "").has_no_text());
    }

    #[test]
    fn test_storage_path() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            storage_path("user-1", "report.pdf", at),
            "user-1/docs/1700000000123-report.pdf"
        );
    }

    #[test]
    fn test_stored_document_record() {
        let at = Utc.timestamp_millis_opt(42).unwrap();
        let doc = ExtractedDocument::new("hello", "<p>hello</p>");
        let record = StoredDocument::new("u", "a.docx", &doc, at);
        assert_eq!(record.file_path, "u/docs/42-a.docx");
        assert_eq!(record.extracted_text, "hello");
        assert_eq!(record.extracted_html, "<p>hello</p>");
        assert_eq!(record.owner_id, "u");
    }

    #[test]
    fn test_extracted_document_json_contract() {
        let doc = ExtractedDocument::new("t", "<p>h</p>");
        let json = serde_json::to_value(&doc).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["text"], "t");
        assert_eq!(obj["html"], "<p>h</p>");
    }
}
