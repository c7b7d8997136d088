//! Classified span types.

use serde::{Deserialize, Serialize};

/// Semantic tag assigned to a run by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticTag {
    /// Second-level heading
    Heading2,
    /// Third-level heading
    Heading3,
    /// Strong emphasis
    Bold,
    /// Emphasis
    Italic,
    /// Body text
    Plain,
}

impl SemanticTag {
    /// HTML element name used for this tag.
    pub fn element(&self) -> &'static str {
        match self {
            SemanticTag::Heading2 => "h2",
            SemanticTag::Heading3 => "h3",
            SemanticTag::Bold => "strong",
            SemanticTag::Italic => "em",
            SemanticTag::Plain => "span",
        }
    }

    /// Check if this tag is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, SemanticTag::Heading2 | SemanticTag::Heading3)
    }
}

/// Inline style carried by a span so markup is self-contained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleAttrs {
    /// Font size in points
    pub font_size_pt: f32,
    /// Bold weight
    pub bold: bool,
    /// Italic style
    pub italic: bool,
}

impl StyleAttrs {
    /// Render as an inline CSS declaration list.
    pub fn to_css(&self) -> String {
        let mut css = format!("font-size: {}px;", self.font_size_pt);
        if self.bold {
            css.push_str(" font-weight: 700;");
        }
        if self.italic {
            css.push_str(" font-style: italic;");
        }
        css
    }
}

/// A classified, style-tagged piece of text ready for emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticSpan {
    /// Semantic tag
    pub tag: SemanticTag,
    /// Decoded text
    pub text: String,
    /// Inline style
    pub style: StyleAttrs,
}

impl SemanticSpan {
    /// Create a new span.
    pub fn new(tag: SemanticTag, text: impl Into<String>, style: StyleAttrs) -> Self {
        Self {
            tag,
            text: text.into(),
            style,
        }
    }
}
