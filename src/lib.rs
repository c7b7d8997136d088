//! # relayout
//!
//! Layout reconstruction for extracted PDF and DOCX content.
//!
//! External tools turn uploaded documents into raw material: a positioned
//! token tree for PDFs, semantic markup plus plain text for DOCX files. This
//! library rebuilds a display-ready `{ text, html }` pair from that material:
//! PDF tokens are grouped into visual lines and classified into headings and
//! emphasis by font size and weight; DOCX paragraphs get inline alignment.
//!
//! ## Quick Start
//!
//! ```
//! use relayout::{Pipeline, Upload};
//!
//! fn main() -> relayout::Result<()> {
//!     let tokens = br#"{"Pages":[{"Texts":[
//!         {"x":1,"y":1,"R":[{"T":"Quarterly%20report","TS":[0,19,0,0]}]},
//!         {"x":1,"y":3,"R":[{"T":"Revenue%20grew.","TS":[0,12,0,0]}]}
//!     ]}]}"#;
//!
//!     let doc = Pipeline::with_defaults()
//!         .process(&Upload::new("report.pdf", "application/pdf", tokens.to_vec()))?;
//!
//!     assert!(doc.html.contains("<h2 style=\"font-size: 19px;\">Quarterly report</h2>"));
//!     assert_eq!(doc.text, "Quarterly report\nRevenue grew.");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line reconstruction**: quantized y grouping, left-to-right ordering
//! - **Run classification**: H2/H3/bold/italic/plain from font size and flags
//! - **DOCX alignment**: `class="center"` and bare paragraphs become inline styles
//! - **Text normalization**: per-format whitespace cleanup
//! - **Input gate**: size and MIME checks before any extraction work
//! - **Parallel processing**: Uses Rayon for multi-page documents
//! - **Async**: optional timeout-bounded extraction (`async` feature)

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use convert::{
    DocumentReconstructor, DocxReconstructor, Extraction, PdfReconstructor, ReconstructorRegistry,
};
pub use detect::{validate_upload, DocumentKind, DOCX_MIME, MAX_INPUT_BYTES, PDF_MIME};
pub use error::{Error, RejectReason, Result};
pub use model::{
    ExtractedDocument, Fragment, Page, Run, SemanticSpan, SemanticTag, StoredDocument, StyleAttrs,
};
pub use parser::{
    ClassifierConfig, DocxConversion, DocxConverter, Line, LineGrouper, PdfExtraction,
    ReconstructOptions, RunClassifier, TokenExtractor,
};
pub use pipeline::{DocumentSink, JsonDirSink, Pipeline, Upload};
pub use render::{ExtractionStats, JsonFormat, RenderOptions};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Render a PDF token tree to HTML with default options.
///
/// # Example
///
/// ```
/// use relayout::{pages_to_html, Fragment, Page};
///
/// let page = Page::with_fragments(1, vec![Fragment::text(1.0, 1.0, "Hi")]);
/// let html = pages_to_html(&[page]);
/// assert!(html.contains("<span style=\"font-size: 12px;\">Hi</span> "));
/// ```
pub fn pages_to_html(pages: &[Page]) -> String {
    render::to_html(pages, &ReconstructOptions::default())
}

/// Reconstruct a PDF extraction into `{ text, html }` without the input gate.
pub fn reconstruct_pdf(
    extraction: PdfExtraction,
    options: &ReconstructOptions,
) -> Result<ExtractedDocument> {
    PdfReconstructor::with_json_dump().reconstruct(Extraction::Pdf(extraction), options)
}

/// Reconstruct a DOCX conversion into `{ text, html }` without the input gate.
///
/// # Example
///
/// ```
/// use relayout::{reconstruct_docx, DocxConversion, ReconstructOptions};
///
/// let conversion = DocxConversion::new("<p>Body</p>", "Body\r\n");
/// let doc = reconstruct_docx(conversion, &ReconstructOptions::default()).unwrap();
/// assert_eq!(doc.html, r#"<p style="text-align: left;">Body</p>"#);
/// assert_eq!(doc.text, "Body");
/// ```
pub fn reconstruct_docx(
    conversion: DocxConversion,
    options: &ReconstructOptions,
) -> Result<ExtractedDocument> {
    DocxReconstructor::with_json_dump().reconstruct(Extraction::Docx(conversion), options)
}

/// Process a file on disk through the default pipeline, taking the MIME
/// type from its extension.
///
/// # Example
///
/// ```no_run
/// let doc = relayout::process_file("report.pdf").unwrap();
/// println!("{}", doc.html);
/// ```
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path).ok_or_else(|| {
        Error::InputRejected(RejectReason::UnsupportedMimeType(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ))
    })?;
    let upload = Upload::from_file(path, kind.mime_type())?;
    Pipeline::with_defaults().process(&upload)
}

/// Builder for a configured [`Pipeline`].
///
/// # Example
///
/// ```
/// use relayout::Relayout;
///
/// let pipeline = Relayout::new()
///     .with_json_collaborators()
///     .with_baseline(10.0)
///     .with_max_bytes(1024 * 1024)
///     .sequential()
///     .build();
/// assert_eq!(pipeline.options().classifier.baseline_pt, 10.0);
/// ```
pub struct Relayout {
    registry: ReconstructorRegistry,
    options: ReconstructOptions,
}

impl Relayout {
    /// Create a builder with no collaborators registered.
    pub fn new() -> Self {
        Self {
            registry: ReconstructorRegistry::new(),
            options: ReconstructOptions::default(),
        }
    }

    /// Register the JSON dump collaborators for both kinds.
    pub fn with_json_collaborators(mut self) -> Self {
        self.registry
            .register(Arc::new(PdfReconstructor::with_json_dump()));
        self.registry
            .register(Arc::new(DocxReconstructor::with_json_dump()));
        self
    }

    /// Use a PDF token extractor.
    pub fn with_token_extractor(mut self, extractor: Arc<dyn TokenExtractor>) -> Self {
        self.registry
            .register(Arc::new(PdfReconstructor::new(extractor)));
        self
    }

    /// Use a DOCX converter.
    pub fn with_docx_converter(mut self, converter: Arc<dyn DocxConverter>) -> Self {
        self.registry
            .register(Arc::new(DocxReconstructor::new(converter)));
        self
    }

    /// Register a custom reconstructor.
    pub fn with_reconstructor(mut self, reconstructor: Arc<dyn DocumentReconstructor>) -> Self {
        self.registry.register(reconstructor);
        self
    }

    /// Set the baseline body font size.
    pub fn with_baseline(mut self, baseline_pt: f32) -> Self {
        self.options = self.options.with_baseline(baseline_pt);
        self
    }

    /// Set the upload size ceiling.
    pub fn with_max_bytes(mut self, bytes: usize) -> Self {
        self.options = self.options.with_max_input_bytes(bytes);
        self
    }

    /// Set the extraction timeout for async processing.
    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_extract_timeout(timeout);
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.options = self.options.with_render_options(render);
        self
    }

    /// Disable parallel page rendering.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: ReconstructOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline::new(self.registry, self.options)
    }
}

impl Default for Relayout {
    fn default() -> Self {
        Self::new()
    }
}
