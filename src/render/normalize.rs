//! Plain-text normalization per document kind.

use regex::Regex;

use crate::detect::DocumentKind;

/// Normalizes extracted plain text.
///
/// PDF text is trimmed only. DOCX text is normalized in order: CRLF to LF,
/// three or more newlines to exactly two, runs of two or more spaces/tabs to
/// one space, then trimmed.
pub struct TextNormalizer {
    blank_lines: Regex,
    horizontal_space: Regex,
}

impl TextNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self {
            blank_lines: Regex::new(r"\n{3,}").unwrap(),
            horizontal_space: Regex::new(r"[ \t]{2,}").unwrap(),
        }
    }

    /// Normalize text for the given document kind.
    pub fn normalize(&self, text: &str, kind: DocumentKind) -> String {
        match kind {
            DocumentKind::Pdf => self.normalize_pdf(text),
            DocumentKind::Docx => self.normalize_docx(text),
        }
    }

    /// Trim leading and trailing whitespace.
    pub fn normalize_pdf(&self, text: &str) -> String {
        text.trim().to_string()
    }

    /// Collapse line endings, blank lines and horizontal whitespace.
    pub fn normalize_docx(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n");
        let paragraphs = self.blank_lines.replace_all(&unified, "\n\n");
        let spaced = self.horizontal_space.replace_all(&paragraphs, " ");
        spaced.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize PDF text.
pub fn normalize_pdf_text(text: &str) -> String {
    TextNormalizer::new().normalize_pdf(text)
}

/// Normalize DOCX text.
pub fn normalize_docx_text(text: &str) -> String {
    TextNormalizer::new().normalize_docx(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_normalization_order() {
        assert_eq!(normalize_docx_text("a\r\n\r\n\r\n\r\nb   c\t\td"), "a\n\nb c d");
    }

    #[test]
    fn test_docx_keeps_single_blank_line_and_single_space() {
        assert_eq!(normalize_docx_text("a\n\nb c"), "a\n\nb c");
        assert_eq!(normalize_docx_text("a\tb"), "a\tb");
        assert_eq!(normalize_docx_text("  \n\n\n x  "), "x");
    }

    #[test]
    fn test_lone_carriage_return_kept() {
        assert_eq!(normalize_docx_text("a\rb"), "a\rb");
    }

    #[test]
    fn test_pdf_trims_only() {
        assert_eq!(normalize_pdf_text("  a\n\n\n\nb   c  \n"), "a\n\n\n\nb   c");
    }

    #[test]
    fn test_normalize_by_kind() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("x   y", DocumentKind::Pdf), "x   y");
        assert_eq!(normalizer.normalize("x   y", DocumentKind::Docx), "x y");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(normalize_docx_text(" \r\n\t \n"), "");
        assert_eq!(normalize_pdf_text(" \n\t"), "");
    }
}
