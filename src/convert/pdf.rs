//! PDF document reconstructor implementation.

use std::sync::Arc;

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::ExtractedDocument;
use crate::parser::{JsonTokenExtractor, ReconstructOptions, TokenExtractor};
use crate::render::{to_html_with_stats, TextNormalizer};

use super::{mismatched, DocumentReconstructor, Extraction};

/// PDF document reconstructor.
///
/// Groups extracted tokens into lines, classifies their runs and emits
/// page-structured HTML; the text artifact is the extractor's raw text,
/// trimmed.
pub struct PdfReconstructor {
    extractor: Arc<dyn TokenExtractor>,
    normalizer: TextNormalizer,
}

impl PdfReconstructor {
    /// Create a reconstructor around a token extractor.
    pub fn new(extractor: Arc<dyn TokenExtractor>) -> Self {
        Self {
            extractor,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Create a reconstructor that reads pdf2json dumps.
    pub fn with_json_dump() -> Self {
        Self::new(Arc::new(JsonTokenExtractor::new()))
    }

    /// Name of the wrapped extractor.
    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }
}

impl DocumentReconstructor for PdfReconstructor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction> {
        log::debug!("Extracting PDF tokens with {}", self.extractor.name());
        self.extractor.extract(bytes).map(Extraction::Pdf)
    }

    fn reconstruct(
        &self,
        extraction: Extraction,
        options: &ReconstructOptions,
    ) -> Result<ExtractedDocument> {
        let extraction = match extraction {
            Extraction::Pdf(extraction) => extraction,
            other => return Err(mismatched(DocumentKind::Pdf, &other)),
        };

        let rendered = to_html_with_stats(&extraction.pages, options);
        let text = self.normalizer.normalize_pdf(&extraction.raw_text);

        let mut stats = rendered.stats;
        stats.count_text(&text);

        Ok(ExtractedDocument::new(text, rendered.html).with_stats(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fragment, Page, Run};
    use crate::parser::{DocxConversion, PdfExtraction};

    #[test]
    fn test_pdf_reconstructor_name() {
        let reconstructor = PdfReconstructor::with_json_dump();
        assert_eq!(reconstructor.name(), "pdf");
        assert_eq!(reconstructor.extractor_name(), "pdf2json-dump");
        assert!(reconstructor.supports_mime("application/pdf"));
        assert!(!reconstructor.supports_mime("application/msword"));
    }

    #[test]
    fn test_reconstruct_pdf() {
        let pages = vec![Page::with_fragments(
            0,
            vec![Fragment::new(1.0, 1.0, vec![Run::new("Title").with_size(19.0)])],
        )];
        let extraction = Extraction::Pdf(PdfExtraction::new("  Title \n", pages));

        let doc = PdfReconstructor::with_json_dump()
            .reconstruct(extraction, &ReconstructOptions::default())
            .unwrap();
        assert_eq!(doc.text, "Title");
        assert!(doc.html.contains("<h2 style=\"font-size: 19px;\">Title</h2> "));
        assert_eq!(doc.stats.heading_count, 1);
        assert_eq!(doc.stats.word_count, 1);
    }

    #[test]
    fn test_reconstruct_rejects_docx_output() {
        let err = PdfReconstructor::with_json_dump()
            .reconstruct(
                Extraction::Docx(DocxConversion::default()),
                &ReconstructOptions::default(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("DOCX extraction output"));
    }
}
