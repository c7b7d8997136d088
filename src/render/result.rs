//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::SemanticTag;

/// Result of rendering markup, including statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub html: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, stats: ExtractionStats) -> Self {
        Self { html, stats }
    }
}

/// Statistics collected while reconstructing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages rendered
    pub page_count: u32,

    /// Lines rendered
    pub line_count: u32,

    /// Spans emitted
    pub span_count: u32,

    /// Spans tagged as headings
    pub heading_count: u32,

    /// Spans tagged as bold
    pub bold_count: u32,

    /// Spans tagged as italic
    pub italic_count: u32,

    /// Runs discarded because their text was blank
    pub dropped_run_count: u32,

    /// Paragraphs in DOCX markup
    pub paragraph_count: u32,

    /// Approximate word count of the text artifact
    pub word_count: u32,

    /// Non-whitespace characters in the text artifact
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Increment line count.
    pub fn add_line(&mut self) {
        self.line_count += 1;
    }

    /// Record an emitted span.
    pub fn add_span(&mut self, tag: SemanticTag) {
        self.span_count += 1;
        match tag {
            SemanticTag::Heading2 | SemanticTag::Heading3 => self.heading_count += 1,
            SemanticTag::Bold => self.bold_count += 1,
            SemanticTag::Italic => self.italic_count += 1,
            SemanticTag::Plain => {}
        }
    }

    /// Increment dropped run count.
    pub fn add_dropped_run(&mut self) {
        self.dropped_run_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.line_count += other.line_count;
        self.span_count += other.span_count;
        self.heading_count += other.heading_count;
        self.bold_count += other.bold_count;
        self.italic_count += other.italic_count;
        self.dropped_run_count += other.dropped_run_count;
        self.paragraph_count += other.paragraph_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_add_span_by_tag() {
        let mut stats = ExtractionStats::new();
        stats.add_span(SemanticTag::Heading2);
        stats.add_span(SemanticTag::Heading3);
        stats.add_span(SemanticTag::Bold);
        stats.add_span(SemanticTag::Plain);

        assert_eq!(stats.span_count, 4);
        assert_eq!(stats.heading_count, 2);
        assert_eq!(stats.bold_count, 1);
        assert_eq!(stats.italic_count, 0);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats {
            page_count: 1,
            line_count: 5,
            ..Default::default()
        };

        let stats2 = ExtractionStats {
            page_count: 1,
            line_count: 3,
            dropped_run_count: 2,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.page_count, 2);
        assert_eq!(stats1.line_count, 8);
        assert_eq!(stats1.dropped_run_count, 2);
    }
}
