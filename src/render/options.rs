//! Rendering options and configuration.

/// Markup emitted when a document has no pages or no markup.
pub const EMPTY_DOCUMENT_PLACEHOLDER: &str = "<p>No content found</p>";

/// Options for rendering HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// HTML-escape span text
    pub escape_text: bool,

    /// Markup for a document with nothing to show
    pub placeholder: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable escaping of span text.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    /// Set the empty-document placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_text: true,
            placeholder: EMPTY_DOCUMENT_PLACEHOLDER.to_string(),
        }
    }
}
