//! Reconstruction options and configuration.

use std::time::Duration;

use crate::detect::MAX_INPUT_BYTES;
use crate::render::RenderOptions;

use super::classify::ClassifierConfig;
use super::layout::DEFAULT_Y_QUANTIZATION;

/// Default bound on a single collaborator extraction call.
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for reconstructing an uploaded document.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Run classification thresholds
    pub classifier: ClassifierConfig,

    /// Scale applied to y before rounding into a line key
    pub y_quantization: f64,

    /// Whether to render pages in parallel
    pub parallel: bool,

    /// Upload size ceiling in bytes
    pub max_input_bytes: usize,

    /// Bound on the collaborator extraction call (async pipeline only)
    pub extract_timeout: Duration,

    /// HTML rendering options
    pub render: RenderOptions,
}

impl ReconstructOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier configuration.
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the baseline body font size used for heading detection.
    pub fn with_baseline(mut self, baseline_pt: f32) -> Self {
        self.classifier = self.classifier.with_baseline(baseline_pt);
        self
    }

    /// Set the y quantization scale.
    pub fn with_quantization(mut self, scale: f64) -> Self {
        self.y_quantization = scale;
        self
    }

    /// Enable or disable parallel page rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page rendering.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }

    /// Set the upload size ceiling.
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Set the extraction timeout.
    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extract_timeout = timeout;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            y_quantization: DEFAULT_Y_QUANTIZATION,
            parallel: true,
            max_input_bytes: MAX_INPUT_BYTES,
            extract_timeout: DEFAULT_EXTRACT_TIMEOUT,
            render: RenderOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_options_builder() {
        let options = ReconstructOptions::new()
            .with_baseline(10.0)
            .with_quantization(4.0)
            .with_max_input_bytes(1024)
            .with_extract_timeout(Duration::from_secs(5))
            .sequential();

        assert_eq!(options.classifier.baseline_pt, 10.0);
        assert_eq!(options.y_quantization, 4.0);
        assert_eq!(options.max_input_bytes, 1024);
        assert_eq!(options.extract_timeout, Duration::from_secs(5));
        assert!(!options.parallel);
    }

    #[test]
    fn test_with_parallel_toggles() {
        let options = ReconstructOptions::new().with_parallel(false);
        assert!(!options.parallel);
        assert!(options.with_parallel(true).parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ReconstructOptions::default();
        assert_eq!(options.classifier.baseline_pt, 12.0);
        assert_eq!(options.y_quantization, 10.0);
        assert_eq!(options.max_input_bytes, 5_242_880);
        assert!(options.parallel);
        assert!(options.render.escape_text);
    }
}
