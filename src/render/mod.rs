//! Rendering module: HTML emission and text normalization.

mod alignment;
mod html;
mod json;
mod normalize;
mod options;
mod result;

pub use alignment::{apply_alignment, AlignmentRewriter};
pub use html::{escape_html, to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use normalize::{normalize_docx_text, normalize_pdf_text, TextNormalizer};
pub use options::{RenderOptions, EMPTY_DOCUMENT_PLACEHOLDER};
pub use result::{ExtractionStats, RenderResult};
