//! Run classification into semantic spans.
//!
//! Each run is assigned the first matching tag, checked in order:
//! size above the H2 threshold, size above the H3 threshold, bold,
//! italic, and plain. Thresholds are strict; a run exactly at a threshold
//! falls through to the next rule.

use serde::{Deserialize, Serialize};

use crate::model::{Run, SemanticSpan, SemanticTag, StyleAttrs};

use super::layout::Line;

/// Thresholds for heading detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Body text size in points
    pub baseline_pt: f32,
    /// Multiple of the baseline a run must exceed to be an H2
    pub heading2_ratio: f32,
    /// Multiple of the baseline a run must exceed to be an H3
    pub heading3_ratio: f32,
}

impl ClassifierConfig {
    /// Set the baseline body size, keeping the ratios.
    pub fn with_baseline(mut self, baseline_pt: f32) -> Self {
        self.baseline_pt = baseline_pt;
        self
    }

    /// Size a run must exceed to be an H2.
    pub fn heading2_threshold(&self) -> f32 {
        self.baseline_pt * self.heading2_ratio
    }

    /// Size a run must exceed to be an H3.
    pub fn heading3_threshold(&self) -> f32 {
        self.baseline_pt * self.heading3_ratio
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            baseline_pt: 12.0,
            heading2_ratio: 1.5,
            heading3_ratio: 1.2,
        }
    }
}

/// Maps runs to semantic spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunClassifier {
    config: ClassifierConfig,
}

impl RunClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Pick the tag for a style.
    pub fn classify_style(&self, font_size_pt: f32, bold: bool, italic: bool) -> SemanticTag {
        if font_size_pt > self.config.heading2_threshold() {
            SemanticTag::Heading2
        } else if font_size_pt > self.config.heading3_threshold() {
            SemanticTag::Heading3
        } else if bold {
            SemanticTag::Bold
        } else if italic {
            SemanticTag::Italic
        } else {
            SemanticTag::Plain
        }
    }

    /// Classify a run. Runs whose decoded text is blank produce no span.
    pub fn classify(&self, run: &Run) -> Option<SemanticSpan> {
        let text = run.decoded_text();
        if text.trim().is_empty() {
            return None;
        }

        let tag = self.classify_style(run.font_size_pt, run.bold, run.italic);
        let style = StyleAttrs {
            font_size_pt: run.font_size_pt,
            bold: run.bold,
            italic: run.italic,
        };
        Some(SemanticSpan::new(tag, text.into_owned(), style))
    }

    /// Classify every run of a line, in fragment then run order.
    pub fn classify_line(&self, line: &Line) -> Vec<SemanticSpan> {
        line.fragments
            .iter()
            .flat_map(|f| f.runs.iter())
            .filter_map(|r| self.classify(r))
            .collect()
    }
}
