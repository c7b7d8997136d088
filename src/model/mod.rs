//! Document model types for layout reconstruction.
//!
//! This module defines the token tree produced by the PDF extractor
//! (pages, fragments, runs), the classified span type emitted by the
//! run classifier, and the final output records.

mod document;
mod page;
mod span;

pub use document::{storage_path, ExtractedDocument, StoredDocument};
pub use page::{Fragment, Page, Run};
pub use span::{SemanticSpan, SemanticTag, StyleAttrs};
