//! Line grouping for positioned text fragments.
//!
//! Fragments are clustered into visual lines by a quantized y key: the
//! coordinate is scaled and rounded so sub-pixel jitter lands in the same
//! bucket while distinct lines stay apart. Lines are ordered top to bottom
//! (ascending key) and fragments within a line left to right (ascending x).

use std::collections::BTreeMap;

use crate::model::{Fragment, Page};

/// Default scale applied to y before rounding.
pub const DEFAULT_Y_QUANTIZATION: f64 = 10.0;

/// A visual line: fragments sharing a quantized y key.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Quantized y key
    pub key: i64,
    /// Fragments sorted by ascending x
    pub fragments: Vec<Fragment>,
}

impl Line {
    /// Decoded text of the line: non-blank runs, trimmed, joined by a space.
    pub fn text(&self) -> String {
        let parts: Vec<String> = self
            .fragments
            .iter()
            .flat_map(|f| f.runs.iter())
            .map(|r| r.decoded_text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Check if the line has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the number of fragments in the line.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

/// Groups fragments into ordered lines.
#[derive(Debug, Clone, Copy)]
pub struct LineGrouper {
    scale: f64,
}

impl LineGrouper {
    /// Create a grouper with the given y scale.
    ///
    /// A non-positive or non-finite scale falls back to the default.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!(
                "Invalid y quantization scale {}, using {}",
                scale,
                DEFAULT_Y_QUANTIZATION
            );
            DEFAULT_Y_QUANTIZATION
        };
        Self { scale }
    }

    /// The y scale in use.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Quantize a y coordinate into a line key. Non-finite input maps to 0.
    pub fn quantize(&self, y: f64) -> i64 {
        let scaled = (finite_or_zero(y) * self.scale).round();
        if scaled.is_finite() {
            scaled as i64
        } else {
            0
        }
    }

    /// Group fragments into lines.
    pub fn group(&self, fragments: &[Fragment]) -> Vec<Line> {
        let mut buckets: BTreeMap<i64, Vec<Fragment>> = BTreeMap::new();
        for fragment in fragments {
            buckets
                .entry(self.quantize(fragment.y))
                .or_default()
                .push(fragment.clone());
        }

        buckets
            .into_iter()
            .map(|(key, mut fragments)| {
                // Stable: equal x keeps extractor order
                fragments.sort_by(|a, b| finite_or_zero(a.x).total_cmp(&finite_or_zero(b.x)));
                Line { key, fragments }
            })
            .collect()
    }

    /// Group a page's fragments into lines.
    pub fn group_page(&self, page: &Page) -> Vec<Line> {
        let lines = self.group(&page.fragments);
        log::trace!(
            "Page {}: {} fragments grouped into {} lines",
            page.number,
            page.fragments.len(),
            lines.len()
        );
        lines
    }
}

impl Default for LineGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_Y_QUANTIZATION)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
