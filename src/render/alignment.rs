//! Paragraph alignment rewrite for converted DOCX markup.
//!
//! The DOCX converter marks centered paragraphs with `class="center"`; every
//! other paragraph is bare. Both are rewritten to inline `text-align` styles
//! so the markup renders the same without a stylesheet.

use regex::Regex;

use super::ExtractionStats;

const CENTER_STYLE: &str = r#"<p style="text-align: center;">"#;
const LEFT_STYLE: &str = r#"<p style="text-align: left;">"#;

/// Rewrites paragraph alignment markers into inline styles.
pub struct AlignmentRewriter {
    center: Regex,
    bare: Regex,
    paragraph: Regex,
    heading: Regex,
}

impl AlignmentRewriter {
    /// Create a new rewriter.
    pub fn new() -> Self {
        Self {
            center: Regex::new(r#"<p\s+class\s*=\s*"center"\s*>"#).unwrap(),
            bare: Regex::new(r"<p\s*>").unwrap(),
            paragraph: Regex::new(r"<p[\s>]").unwrap(),
            heading: Regex::new(r"<h[1-6][\s>]").unwrap(),
        }
    }

    /// Rewrite alignment markers. Already-styled paragraphs and every other
    /// element pass through untouched, so the rewrite is idempotent.
    pub fn rewrite(&self, html: &str) -> String {
        let centered = self.center.replace_all(html, CENTER_STYLE);
        self.bare.replace_all(&centered, LEFT_STYLE).into_owned()
    }

    /// Count paragraphs and headings in markup.
    pub fn collect_stats(&self, html: &str, stats: &mut ExtractionStats) {
        for _ in self.paragraph.find_iter(html) {
            stats.add_paragraph();
        }
        stats.heading_count += self.heading.find_iter(html).count() as u32;
    }
}

impl Default for AlignmentRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite DOCX paragraph alignment with a fresh rewriter.
pub fn apply_alignment(html: &str) -> String {
    AlignmentRewriter::new().rewrite(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_bare() {
        let html = r#"<h1>Title</h1><p class="center">Mid</p><p>Body</p>"#;
        assert_eq!(
            apply_alignment(html),
            r#"<h1>Title</h1><p style="text-align: center;">Mid</p><p style="text-align: left;">Body</p>"#
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let rewriter = AlignmentRewriter::new();
        let html = r#"<p>One</p><p class="center">Two</p><ul><li><p>Three</p></li></ul>"#;
        let once = rewriter.rewrite(html);
        assert_eq!(rewriter.rewrite(&once), once);
    }

    #[test]
    fn test_other_markup_untouched() {
        let html = r#"<pre>code</pre><p class="note">x</p><table><tr><td>1</td></tr></table>"#;
        assert_eq!(apply_alignment(html), html);
    }

    #[test]
    fn test_empty_markup() {
        assert_eq!(apply_alignment(""), "");
    }

    #[test]
    fn test_collect_stats() {
        let rewriter = AlignmentRewriter::new();
        let html = rewriter.rewrite(r#"<h2>A</h2><p>b</p><p class="center">c</p><pre>d</pre>"#);
        let mut stats = ExtractionStats::new();
        rewriter.collect_stats(&html, &mut stats);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.heading_count, 1);

        rewriter.collect_stats("<p>e</p>", &mut stats);
        assert_eq!(stats.paragraph_count, 3);
    }
}
