//! DOCX document reconstructor implementation.

use std::sync::Arc;

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::ExtractedDocument;
use crate::parser::{DocxConverter, JsonDocxConverter, ReconstructOptions};
use crate::render::{AlignmentRewriter, ExtractionStats, TextNormalizer};

use super::{mismatched, DocumentReconstructor, Extraction};

/// DOCX document reconstructor.
///
/// Keeps the converter's markup, rewriting paragraph alignment to inline
/// styles, and normalizes the converter's raw text.
pub struct DocxReconstructor {
    converter: Arc<dyn DocxConverter>,
    rewriter: AlignmentRewriter,
    normalizer: TextNormalizer,
}

impl DocxReconstructor {
    /// Create a reconstructor around a DOCX converter.
    pub fn new(converter: Arc<dyn DocxConverter>) -> Self {
        Self {
            converter,
            rewriter: AlignmentRewriter::new(),
            normalizer: TextNormalizer::new(),
        }
    }

    /// Create a reconstructor that reads converter JSON dumps.
    pub fn with_json_dump() -> Self {
        Self::new(Arc::new(JsonDocxConverter::new()))
    }

    /// Name of the wrapped converter.
    pub fn converter_name(&self) -> &str {
        self.converter.name()
    }
}

impl DocumentReconstructor for DocxReconstructor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction> {
        log::debug!("Converting DOCX with {}", self.converter.name());
        self.converter.convert(bytes).map(Extraction::Docx)
    }

    fn reconstruct(
        &self,
        extraction: Extraction,
        options: &ReconstructOptions,
    ) -> Result<ExtractedDocument> {
        let conversion = match extraction {
            Extraction::Docx(conversion) => conversion,
            other => return Err(mismatched(DocumentKind::Docx, &other)),
        };

        let mut stats = ExtractionStats::new();
        let html = if conversion.html.trim().is_empty() {
            options.render.placeholder.clone()
        } else {
            let html = self.rewriter.rewrite(&conversion.html);
            self.rewriter.collect_stats(&html, &mut stats);
            html
        };

        let text = self.normalizer.normalize_docx(&conversion.raw_text);
        stats.count_text(&text);

        Ok(ExtractedDocument::new(text, html).with_stats(stats))
    }
}
