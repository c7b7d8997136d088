//! HTML rendering for PDF token trees.
//!
//! Output shape:
//!
//! ```text
//! <div class="pdf-document">
//!   <div class="pdf-page" data-page="1">
//!     <div class="pdf-line"><h2 style="font-size: 19px;">Title</h2> </div>
//!   </div>
//! </div>
//! ```
//!
//! (emitted without whitespace between elements).

use std::borrow::Cow;
use std::fmt::Write as _;

use rayon::prelude::*;

use crate::model::{Page, SemanticSpan};
use crate::parser::{Line, LineGrouper, ReconstructOptions, RunClassifier};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert pages to HTML.
pub fn to_html(pages: &[Page], options: &ReconstructOptions) -> String {
    HtmlRenderer::new(options).render(pages).html
}

/// Convert pages to HTML with statistics.
pub fn to_html_with_stats(pages: &[Page], options: &ReconstructOptions) -> RenderResult {
    HtmlRenderer::new(options).render(pages)
}

/// HTML renderer for PDF pages.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    grouper: LineGrouper,
    classifier: RunClassifier,
    options: RenderOptions,
    parallel: bool,
}

impl HtmlRenderer {
    /// Create a new renderer.
    pub fn new(options: &ReconstructOptions) -> Self {
        Self {
            grouper: LineGrouper::new(options.y_quantization),
            classifier: RunClassifier::new(options.classifier),
            options: options.render.clone(),
            parallel: options.parallel,
        }
    }

    /// Render all pages into one document.
    pub fn render(&self, pages: &[Page]) -> RenderResult {
        if pages.is_empty() {
            return RenderResult::new(self.options.placeholder.clone(), ExtractionStats::new());
        }

        let rendered: Vec<(String, ExtractionStats)> = if self.parallel && pages.len() > 1 {
            pages
                .par_iter()
                .enumerate()
                .map(|(i, page)| self.render_page(i + 1, page))
                .collect()
        } else {
            pages
                .iter()
                .enumerate()
                .map(|(i, page)| self.render_page(i + 1, page))
                .collect()
        };

        let capacity = rendered.iter().map(|(html, _)| html.len()).sum::<usize>() + 40;
        let mut html = String::with_capacity(capacity);
        let mut stats = ExtractionStats::new();

        html.push_str("<div class=\"pdf-document\">");
        for (page_html, page_stats) in &rendered {
            html.push_str(page_html);
            stats.merge(page_stats);
        }
        html.push_str("</div>");

        log::debug!(
            "Rendered {} pages, {} lines, {} spans ({} runs dropped)",
            stats.page_count,
            stats.line_count,
            stats.span_count,
            stats.dropped_run_count
        );

        RenderResult::new(html, stats)
    }

    /// Render one page. `number` is the 1-based position in the document.
    pub fn render_page(&self, number: usize, page: &Page) -> (String, ExtractionStats) {
        let mut stats = ExtractionStats::new();
        stats.add_page();

        let mut html = String::new();
        let _ = write!(html, "<div class=\"pdf-page\" data-page=\"{}\">", number);
        for line in self.grouper.group_page(page) {
            self.render_line(&mut html, &line, &mut stats);
        }
        html.push_str("</div>");

        (html, stats)
    }

    fn render_line(&self, out: &mut String, line: &Line, stats: &mut ExtractionStats) {
        stats.add_line();
        out.push_str("<div class=\"pdf-line\">");
        for run in line.fragments.iter().flat_map(|f| f.runs.iter()) {
            match self.classifier.classify(run) {
                Some(span) => {
                    stats.add_span(span.tag);
                    self.render_span(out, &span);
                }
                None => stats.add_dropped_run(),
            }
        }
        out.push_str("</div>");
    }

    fn render_span(&self, out: &mut String, span: &SemanticSpan) {
        let element = span.tag.element();
        let text = if self.options.escape_text {
            escape_html(&span.text)
        } else {
            Cow::Borrowed(span.text.as_str())
        };
        let _ = write!(
            out,
            "<{el} style=\"{css}\">{text}</{el}> ",
            el = element,
            css = span.style.to_css(),
            text = text
        );
    }
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
