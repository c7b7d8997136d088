//! Document reconstructor module providing one implementation per upload kind.
//!
//! A reconstructor pairs an external extraction collaborator with the
//! in-memory reconstruction that turns its output into `{ text, html }`.
//! Reconstructors are registered by [`DocumentKind`] and selected from the
//! upload's declared MIME type.
//!
//! # Example
//!
//! ```
//! use relayout::convert::ReconstructorRegistry;
//! use relayout::parser::ReconstructOptions;
//!
//! fn main() -> relayout::Result<()> {
//!     let registry = ReconstructorRegistry::with_defaults();
//!     let tokens = br#"{"Pages":[{"Texts":[{"x":1,"y":1,"R":[{"T":"Hello"}]}]}]}"#;
//!
//!     let doc = registry.convert_bytes(tokens, "application/pdf", &ReconstructOptions::default())?;
//!     assert_eq!(doc.text, "Hello");
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;

pub use docx::DocxReconstructor;
pub use pdf::PdfReconstructor;

use crate::detect::DocumentKind;
use crate::error::{Error, Result};
use crate::model::ExtractedDocument;
use crate::parser::{DocxConversion, PdfExtraction, ReconstructOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Raw collaborator output, before reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Token tree and raw text from the PDF extractor
    Pdf(PdfExtraction),
    /// Markup and raw text from the DOCX converter
    Docx(DocxConversion),
}

impl Extraction {
    /// The document kind this output belongs to.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Extraction::Pdf(_) => DocumentKind::Pdf,
            Extraction::Docx(_) => DocumentKind::Docx,
        }
    }
}

/// Trait for document reconstructors.
///
/// Implement this trait to add support for a new upload kind.
pub trait DocumentReconstructor: Send + Sync {
    /// The upload kind handled by this reconstructor.
    fn kind(&self) -> DocumentKind;

    /// Get the name of this reconstructor.
    fn name(&self) -> &str;

    /// Run the external collaborator over the upload bytes.
    fn extract(&self, bytes: &[u8]) -> Result<Extraction>;

    /// Turn collaborator output into the text and HTML artifacts.
    fn reconstruct(
        &self,
        extraction: Extraction,
        options: &ReconstructOptions,
    ) -> Result<ExtractedDocument>;

    /// Extract then reconstruct.
    fn convert_bytes(&self, bytes: &[u8], options: &ReconstructOptions) -> Result<ExtractedDocument> {
        let extraction = self.extract(bytes)?;
        self.reconstruct(extraction, options)
    }

    /// Check if this reconstructor handles the given MIME type.
    fn supports_mime(&self, mime: &str) -> bool {
        DocumentKind::from_mime(mime) == Some(self.kind())
    }
}

pub(crate) fn mismatched(expected: DocumentKind, got: &Extraction) -> Error {
    Error::Other(format!(
        "{} reconstructor received {} extraction output",
        expected,
        got.kind()
    ))
}

/// Registry for document reconstructors.
///
/// The registry maps upload kinds to reconstructors and provides
/// convenient methods for dispatching by MIME type.
#[derive(Default)]
pub struct ReconstructorRegistry {
    by_kind: HashMap<DocumentKind, Arc<dyn DocumentReconstructor>>,
    by_name: HashMap<String, Arc<dyn DocumentReconstructor>>,
}

impl ReconstructorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry backed by the JSON dump collaborators.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfReconstructor::with_json_dump()));
        registry.register(Arc::new(DocxReconstructor::with_json_dump()));
        registry
    }

    /// Register a reconstructor, replacing any previous one for its kind.
    pub fn register(&mut self, reconstructor: Arc<dyn DocumentReconstructor>) {
        if let Some(previous) = self.by_kind.insert(reconstructor.kind(), reconstructor.clone()) {
            log::debug!(
                "Replacing {} reconstructor '{}' with '{}'",
                previous.kind(),
                previous.name(),
                reconstructor.name()
            );
            self.by_name.remove(&previous.name().to_lowercase());
        }
        self.by_name
            .insert(reconstructor.name().to_lowercase(), reconstructor);
    }

    /// Get the reconstructor for a document kind.
    pub fn get(&self, kind: DocumentKind) -> Option<Arc<dyn DocumentReconstructor>> {
        self.by_kind.get(&kind).cloned()
    }

    /// Get a reconstructor by MIME type.
    pub fn get_by_mime(&self, mime: &str) -> Option<Arc<dyn DocumentReconstructor>> {
        DocumentKind::from_mime(mime).and_then(|kind| self.get(kind))
    }

    /// Get a reconstructor by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentReconstructor>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a MIME type is supported.
    pub fn supports(&self, mime: &str) -> bool {
        self.get_by_mime(mime).is_some()
    }

    /// Get all registered kinds, in declaration order.
    pub fn kinds(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .filter(|k| self.by_kind.contains_key(k))
            .collect()
    }

    /// Reconstruct bytes using the MIME type to pick the reconstructor.
    ///
    /// No size or allow-list checks happen here; see [`crate::Pipeline`].
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        mime: &str,
        options: &ReconstructOptions,
    ) -> Result<ExtractedDocument> {
        let reconstructor = self
            .get_by_mime(mime)
            .ok_or_else(|| Error::Other(format!("No reconstructor for MIME type: {}", mime)))?;

        reconstructor.convert_bytes(bytes, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DOCX_MIME, PDF_MIME};

    #[test]
    fn test_registry_with_defaults() {
        let registry = ReconstructorRegistry::with_defaults();
        assert!(registry.supports(PDF_MIME));
        assert!(!registry.supports("Application/PDF"));
        assert!(!registry.supports(" application/pdf"));
        assert!(registry.supports(DOCX_MIME));
        assert!(!registry.supports("application/msword"));
        assert_eq!(registry.kinds(), vec![DocumentKind::Pdf, DocumentKind::Docx]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ReconstructorRegistry::with_defaults();
        let reconstructor = registry.get_by_name("PDF");
        assert!(reconstructor.is_some());
        assert_eq!(reconstructor.unwrap().kind(), DocumentKind::Pdf);
    }

    #[test]
    fn test_register_replaces_kind() {
        let mut registry = ReconstructorRegistry::with_defaults();
        registry.register(Arc::new(PdfReconstructor::with_json_dump()));
        assert_eq!(registry.kinds().len(), 2);
        assert!(registry.get_by_name("pdf").is_some());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ReconstructorRegistry::new();
        assert!(!registry.supports(PDF_MIME));
        let err = registry
            .convert_bytes(b"{}", PDF_MIME, &ReconstructOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("No reconstructor"));
    }

    #[test]
    fn test_extraction_kind() {
        assert_eq!(
            Extraction::Docx(DocxConversion::default()).kind(),
            DocumentKind::Docx
        );
        assert_eq!(
            Extraction::Pdf(PdfExtraction::default()).kind(),
            DocumentKind::Pdf
        );
    }
}
