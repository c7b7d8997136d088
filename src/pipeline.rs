//! Upload processing pipeline.
//!
//! One upload flows through: input gate, collaborator extraction,
//! reconstruction, empty-result check and (optionally) persistence.
//! Rejected uploads never reach the collaborator.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use crate::convert::{DocumentReconstructor, ReconstructorRegistry};
use crate::detect::validate_upload;
use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, StoredDocument};
use crate::parser::ReconstructOptions;

/// An uploaded file with its declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name
    pub file_name: String,
    /// MIME type declared by the client
    pub mime_type: String,
    /// File content
    pub bytes: Vec<u8>,
    /// Uploading user
    pub owner_id: String,
}

impl Upload {
    /// Create an upload with an anonymous owner.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
            owner_id: "anonymous".to_string(),
        }
    }

    /// Set the uploading user.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    /// Read an upload from disk.
    pub fn from_file<P: AsRef<Path>>(path: P, mime_type: &str) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Ok(Self::new(file_name_of(path), mime_type, bytes))
    }

    /// Read an upload from disk without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn from_file_async<P: AsRef<Path>>(path: P, mime_type: &str) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name_of(path), mime_type, bytes))
    }

    /// Size of the upload in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Persistence collaborator for reconstructed documents.
pub trait DocumentSink: Send + Sync {
    /// Store one record.
    fn store(&self, record: &StoredDocument) -> Result<()>;
}

/// [`DocumentSink`] writing one pretty JSON file per record into a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    /// Create a sink rooted at `dir`. The directory is created on first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory records are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a record is written to: its storage path, flattened, plus `.json`.
    pub fn record_path(&self, record: &StoredDocument) -> PathBuf {
        let flat = record.file_path.replace(['/', '\\'], "_");
        self.dir.join(format!("{}.json", flat))
    }
}

impl DocumentSink for JsonDirSink {
    fn store(&self, record: &StoredDocument) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| Error::Persistence(format!("cannot serialize record: {}", e)))?;
        let path = self.record_path(record);
        fs::write(&path, json)?;
        log::info!("Stored {} at {}", record.file_path, path.display());
        Ok(())
    }
}

/// Processes uploads into `{ text, html }` documents.
#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<ReconstructorRegistry>,
    options: ReconstructOptions,
}

impl Pipeline {
    /// Create a pipeline over a registry.
    pub fn new(registry: ReconstructorRegistry, options: ReconstructOptions) -> Self {
        Self {
            registry: Arc::new(registry),
            options,
        }
    }

    /// Create a pipeline with JSON dump collaborators and default options.
    pub fn with_defaults() -> Self {
        Self::new(
            ReconstructorRegistry::with_defaults(),
            ReconstructOptions::default(),
        )
    }

    /// The options in use.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// The registry in use.
    pub fn registry(&self) -> &ReconstructorRegistry {
        &self.registry
    }

    /// Run the input gate and pick the reconstructor. Does no extraction.
    pub fn admit(&self, upload: &Upload) -> Result<Arc<dyn DocumentReconstructor>> {
        let kind = validate_upload(&upload.mime_type, upload.size(), self.options.max_input_bytes)
            .map_err(|e| {
                log::warn!("Rejected upload '{}': {}", upload.file_name, e);
                e
            })?;

        self.registry
            .get(kind)
            .ok_or_else(|| Error::Other(format!("No reconstructor registered for {}", kind)))
    }

    /// Process one upload.
    pub fn process(&self, upload: &Upload) -> Result<ExtractedDocument> {
        let reconstructor = self.admit(upload)?;
        log::info!(
            "Processing '{}' ({} bytes) with {}",
            upload.file_name,
            upload.size(),
            reconstructor.name()
        );

        let extraction = reconstructor.extract(&upload.bytes)?;
        let document = reconstructor.reconstruct(extraction, &self.options)?;
        ensure_text(document)
    }

    /// Process one upload and hand the record to a sink.
    pub fn process_and_store(
        &self,
        upload: &Upload,
        sink: &dyn DocumentSink,
    ) -> Result<StoredDocument> {
        let document = self.process(upload)?;
        self.store(upload, &document, sink)
    }

    /// Build the record for a processed upload and hand it to a sink.
    pub fn store(
        &self,
        upload: &Upload,
        document: &ExtractedDocument,
        sink: &dyn DocumentSink,
    ) -> Result<StoredDocument> {
        let record = StoredDocument::new(&upload.owner_id, &upload.file_name, document, Utc::now());
        sink.store(&record)?;
        Ok(record)
    }

    /// Process one upload, running extraction on the blocking pool under
    /// the configured timeout.
    #[cfg(feature = "async")]
    pub async fn process_async(&self, upload: Upload) -> Result<ExtractedDocument> {
        let reconstructor = self.admit(&upload)?;
        let extractor = Arc::clone(&reconstructor);
        let bytes = upload.bytes;

        let extraction = tokio::time::timeout(
            self.options.extract_timeout,
            tokio::task::spawn_blocking(move || extractor.extract(&bytes)),
        )
        .await
        .map_err(|_| Error::ExtractionFailed("extraction timed out".to_string()))?
        .map_err(|e| Error::ExtractionFailed(format!("task join error: {e}")))??;

        let document = reconstructor.reconstruct(extraction, &self.options)?;
        ensure_text(document)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn ensure_text(document: ExtractedDocument) -> Result<ExtractedDocument> {
    if document.has_no_text() {
        log::warn!("Extraction produced no text");
        return Err(Error::EmptyResult);
    }
    log::debug!(
        "Extracted {} words, {} bytes of HTML",
        document.stats.word_count,
        document.html.len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DOCX_MIME, PDF_MIME};
    use chrono::TimeZone;

    const TOKENS: &[u8] =
        br#"{"Pages":[{"Texts":[{"x":1,"y":1,"R":[{"T":"Hello%20world","TS":[0,12,0,0]}]}]}]}"#;

    #[test]
    fn test_process_pdf_dump() {
        let doc = Pipeline::with_defaults()
            .process(&Upload::new("a.pdf", PDF_MIME, TOKENS))
            .unwrap();
        assert_eq!(doc.text, "Hello world");
        assert!(doc.html.starts_with("<div class=\"pdf-document\">"));
    }

    #[test]
    fn test_rejects_before_extraction() {
        let pipeline = Pipeline::with_defaults();
        let err = pipeline
            .process(&Upload::new("a.doc", "application/msword", TOKENS))
            .unwrap_err();
        assert!(err.is_input_rejected());

        let err = pipeline
            .process(&Upload::new("a.pdf", " Application/PDF ", TOKENS))
            .unwrap_err();
        assert!(err.is_input_rejected());
    }

    #[test]
    fn test_zero_byte_upload_fails_extraction() {
        let err = Pipeline::with_defaults()
            .process(&Upload::new("a.pdf", PDF_MIME, Vec::<u8>::new()))
            .unwrap_err();
        assert!(err.is_extraction_failed());
    }

    #[test]
    fn test_whitespace_docx_is_empty_result() {
        let upload = Upload::new("a.docx", DOCX_MIME, br#"{"html":"<p> </p>","text":" \r\n\t "}"#.to_vec());
        let err = Pipeline::with_defaults().process(&upload).unwrap_err();
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_missing_reconstructor() {
        let pipeline = Pipeline::new(ReconstructorRegistry::new(), ReconstructOptions::default());
        let err = pipeline
            .process(&Upload::new("a.pdf", PDF_MIME, TOKENS))
            .unwrap_err();
        assert!(err.to_string().contains("No reconstructor registered for PDF"));
    }

    #[test]
    fn test_upload_builder() {
        let upload = Upload::new("a.pdf", PDF_MIME, vec![1, 2, 3]).with_owner("user-7");
        assert_eq!(upload.owner_id, "user-7");
        assert_eq!(upload.size(), 3);
    }

    #[test]
    fn test_record_path_is_flat() {
        let sink = JsonDirSink::new("/tmp/records");
        let doc = ExtractedDocument::new("t", "h");
        let at = Utc.timestamp_millis_opt(5).unwrap();
        let record = StoredDocument::new("u", "a.pdf", &doc, at);
        assert_eq!(
            sink.record_path(&record),
            Path::new("/tmp/records").join("u_docs_5-a.pdf.json")
        );
    }
}
