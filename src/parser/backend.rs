//! Extraction collaborator abstraction layer.
//!
//! Provides trait-based interfaces for the external tools that turn upload
//! bytes into something reconstructable, isolating the concrete parser
//! (pdf2json, mammoth, ...) from the layout reconstruction logic.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Page;

use super::layout::LineGrouper;

/// Output of the PDF token extractor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfExtraction {
    /// Plain text as reported by the extractor
    pub raw_text: String,
    /// Pages in document order, numbered from 1
    pub pages: Vec<Page>,
}

impl PdfExtraction {
    /// Create an extraction, renumbering pages from 1.
    pub fn new(raw_text: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            raw_text: raw_text.into(),
            pages: number_pages(pages),
        }
    }

    /// Create an extraction whose raw text is derived from the token tree.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let pages = number_pages(pages);
        let raw_text = derive_raw_text(&pages);
        Self { raw_text, pages }
    }
}

/// Output of the DOCX converter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocxConversion {
    /// Semantic HTML for the document body
    pub html: String,
    /// Plain text of the document body
    #[serde(rename = "text", alias = "raw_text")]
    pub raw_text: String,
}

impl DocxConversion {
    /// Create a conversion result.
    pub fn new(html: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Turns PDF bytes into positioned text tokens.
pub trait TokenExtractor: Send + Sync {
    /// Human-readable name of the extractor.
    fn name(&self) -> &str;

    /// Extract the token tree and raw text.
    fn extract(&self, data: &[u8]) -> Result<PdfExtraction>;
}

/// Turns DOCX bytes into semantic HTML and plain text.
pub trait DocxConverter: Send + Sync {
    /// Human-readable name of the converter.
    fn name(&self) -> &str;

    /// Convert the document.
    fn convert(&self, data: &[u8]) -> Result<DocxConversion>;
}

/// Reconstruct plain text from pages: line text joined by newlines,
/// pages separated by a blank line.
pub fn derive_raw_text(pages: &[Page]) -> String {
    let grouper = LineGrouper::default();
    let rendered: Vec<String> = pages
        .iter()
        .map(|page| {
            let lines: Vec<String> = grouper
                .group_page(page)
                .iter()
                .map(|line| line.text())
                .collect();
            lines.join("\n")
        })
        .collect();
    rendered.join("\n\n")
}

fn number_pages(mut pages: Vec<Page>) -> Vec<Page> {
    for (i, page) in pages.iter_mut().enumerate() {
        page.number = (i + 1) as u32;
    }
    pages
}

// ---------------------------------------------------------------------------
// JSON-backed collaborators: read dumps written by the external tools
// ---------------------------------------------------------------------------

/// Top level of a pdf2json dump.
#[derive(Debug, Deserialize)]
struct TokenDump {
    #[serde(rename = "Pages", default)]
    pages: Vec<Page>,
    #[serde(rename = "RawText", default)]
    raw_text: Option<String>,
}

/// [`TokenExtractor`] that reads a pdf2json JSON dump.
///
/// Accepts `{"Pages": [{"Texts": [...]}], "RawText": "..."}`; the legacy
/// `{"formImage": {"Pages": [...]}}` wrapper is unwrapped too. When
/// `RawText` is absent the text is derived from the tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTokenExtractor;

impl JsonTokenExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TokenExtractor for JsonTokenExtractor {
    fn name(&self) -> &str {
        "pdf2json-dump"
    }

    fn extract(&self, data: &[u8]) -> Result<PdfExtraction> {
        let mut value: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| Error::ExtractionFailed(format!("invalid token dump: {}", e)))?;
        let wrapped = value.get_mut("formImage").map(serde_json::Value::take);
        if let Some(inner) = wrapped {
            value = inner;
        }

        let dump: TokenDump = serde_json::from_value(value)
            .map_err(|e| Error::ExtractionFailed(format!("invalid token dump: {}", e)))?;

        log::debug!("Token dump: {} pages", dump.pages.len());
        Ok(match dump.raw_text {
            Some(raw_text) => PdfExtraction::new(raw_text, dump.pages),
            None => PdfExtraction::from_pages(dump.pages),
        })
    }
}

/// [`DocxConverter`] that reads a converter JSON dump: `{"html": ..., "text": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocxConverter;

impl JsonDocxConverter {
    /// Create a new converter.
    pub fn new() -> Self {
        Self
    }
}

impl DocxConverter for JsonDocxConverter {
    fn name(&self) -> &str {
        "docx-dump"
    }

    fn convert(&self, data: &[u8]) -> Result<DocxConversion> {
        serde_json::from_slice(data)
            .map_err(|e| Error::ExtractionFailed(format!("invalid conversion dump: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;

    #[test]
    fn test_pages_numbered_from_one() {
        let extraction = PdfExtraction::new("x", vec![Page::new(0), Page::new(0), Page::new(9)]);
        let numbers: Vec<u32> = extraction.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_derive_raw_text() {
        let pages = vec![
            Page::with_fragments(
                0,
                vec![
                    Fragment::text(5.0, 1.0, "world"),
                    Fragment::text(1.0, 1.0, "Hello"),
                    Fragment::text(1.0, 2.0, "Next%20line"),
                ],
            ),
            Page::with_fragments(0, vec![Fragment::text(1.0, 1.0, "Page two")]),
        ];
        let extraction = PdfExtraction::from_pages(pages);
        assert_eq!(extraction.raw_text, "Hello world\nNext line\n\nPage two");
    }

    #[test]
    fn test_json_token_extractor() {
        let dump = br#"{"Pages":[{"Texts":[{"x":1,"y":2,"R":[{"T":"Hi","TS":[0,19,0,0]}]}]}],"RawText":"Hi\n"}"#;
        let extraction = JsonTokenExtractor::new().extract(dump).unwrap();
        assert_eq!(extraction.raw_text, "Hi\n");
        assert_eq!(extraction.pages.len(), 1);
        assert_eq!(extraction.pages[0].number, 1);
        assert_eq!(extraction.pages[0].fragments[0].runs[0].font_size_pt, 19.0);
    }

    #[test]
    fn test_json_token_extractor_form_image_wrapper() {
        let dump = br#"{"formImage":{"Pages":[{"Texts":[{"x":1,"y":2,"R":[{"T":"A"}]}]}]}}"#;
        let extraction = JsonTokenExtractor::new().extract(dump).unwrap();
        assert_eq!(extraction.pages.len(), 1);
        assert_eq!(extraction.raw_text, "A");
    }

    #[test]
    fn test_json_token_extractor_rejects_garbage() {
        let err = JsonTokenExtractor::new().extract(b"%PDF-1.7").unwrap_err();
        assert!(err.is_extraction_failed());
    }

    #[test]
    fn test_json_docx_converter() {
        let dump = br#"{"html":"<p>Hi</p>","text":"Hi"}"#;
        let conversion = JsonDocxConverter::new().convert(dump).unwrap();
        assert_eq!(conversion, DocxConversion::new("<p>Hi</p>", "Hi"));

        let err = JsonDocxConverter::new().convert(b"PK\x03\x04").unwrap_err();
        assert!(err.is_extraction_failed());
    }
}
