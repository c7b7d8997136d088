//! Page-level types: the token tree produced by the PDF extractor.
//!
//! The serde representation follows the pdf2json dump layout
//! (`Texts`, `R`, `T`, `TS`) so extractor output can be loaded directly.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Font size assumed when the extractor reports none.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A single page of positioned text fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(skip)]
    pub number: u32,

    /// Fragments in extractor order
    #[serde(rename = "Texts", default)]
    pub fragments: Vec<Fragment>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Create a page from fragments.
    pub fn with_fragments(number: u32, fragments: Vec<Fragment>) -> Self {
        Self { number, fragments }
    }

    /// Add a fragment to the page.
    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

/// A positioned group of styled runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Horizontal position (intra-line ordering key)
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x: f64,

    /// Vertical position (line grouping key)
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y: f64,

    /// Styled runs at this position
    #[serde(rename = "R", default)]
    pub runs: Vec<Run>,
}

impl Fragment {
    /// Create a fragment at the given position.
    pub fn new(x: f64, y: f64, runs: Vec<Run>) -> Self {
        Self { x, y, runs }
    }

    /// Create a fragment holding a single plain run.
    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::new(x, y, vec![Run::new(text)])
    }

    /// Decoded text of all runs, concatenated.
    pub fn decoded_text(&self) -> String {
        self.runs.iter().map(|r| r.decoded_text()).collect()
    }
}

/// An atomic styled text unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRun", into = "RawRun")]
pub struct Run {
    /// Text as reported by the extractor (percent-encoded)
    pub text: String,
    /// Index into the extractor's font-family table
    pub font_family_index: i32,
    /// Font size in points
    pub font_size_pt: f32,
    /// Bold weight
    pub bold: bool,
    /// Italic style
    pub italic: bool,
}

impl Run {
    /// Create a plain run at the default size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family_index: 0,
            font_size_pt: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
        }
    }

    /// Set the font size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.font_size_pt = size;
        self
    }

    /// Mark the run as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the run as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the font-family index.
    pub fn with_family(mut self, index: i32) -> Self {
        self.font_family_index = index;
        self
    }

    /// Percent-decode the run text.
    ///
    /// Malformed escapes are kept verbatim; a decode producing invalid UTF-8
    /// falls back to the raw text.
    pub fn decoded_text(&self) -> Cow<'_, str> {
        match urlencoding::decode(&self.text) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::debug!("Run text is not valid percent-encoded UTF-8: {}", e);
                Cow::Borrowed(&self.text)
            }
        }
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Wire form of a run: `{ "T": text, "TS": [family, size, bold, italic] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRun {
    #[serde(rename = "T", default)]
    text: Option<String>,
    #[serde(rename = "TS", default)]
    style: Vec<Value>,
}

impl From<RawRun> for Run {
    fn from(raw: RawRun) -> Self {
        let number = |i: usize| raw.style.get(i).and_then(Value::as_f64);

        let font_size_pt = number(1)
            .map(|s| s as f32)
            .filter(|s| s.is_finite() && *s != 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE);

        Self {
            text: raw.text.unwrap_or_default(),
            font_family_index: number(0).map(|f| f as i32).unwrap_or(0),
            font_size_pt,
            bold: number(2) == Some(1.0),
            italic: number(3) == Some(1.0),
        }
    }
}

impl From<Run> for RawRun {
    fn from(run: Run) -> Self {
        Self {
            text: Some(run.text),
            style: vec![
                Value::from(run.font_family_index),
                Value::from(run.font_size_pt as f64),
                Value::from(u8::from(run.bold)),
                Value::from(u8::from(run.italic)),
            ],
        }
    }
}

/// Deserialize a coordinate, treating anything non-numeric as 0.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coordinate_from_value(&value))
}

fn coordinate_from_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}
