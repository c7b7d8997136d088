//! PDF token reconstruction module.

mod backend;
mod classify;
mod layout;
mod options;

pub use backend::{
    derive_raw_text, DocxConversion, DocxConverter, JsonDocxConverter, JsonTokenExtractor,
    PdfExtraction, TokenExtractor,
};
pub use classify::{ClassifierConfig, RunClassifier};
pub use layout::{Line, LineGrouper, DEFAULT_Y_QUANTIZATION};
pub use options::{ReconstructOptions, DEFAULT_EXTRACT_TIMEOUT};
