//! Layout primitives supplied by an external document reader.

use serde::{Deserialize, Serialize};

/// An atomic run of styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content (untrimmed)
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32, page_number: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            page_number,
        }
    }
}

/// All spans of one document, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document identifier (usually the source file name)
    pub id: String,
    /// Spans in page order
    pub spans: Vec<Span>,
}

impl DocumentLayout {
    /// Create a layout for the given document id.
    pub fn new(id: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            id: id.into(),
            spans,
        }
    }

    /// Number of pages referenced by the spans.
    pub fn page_count(&self) -> u32 {
        self.spans.iter().map(|s| s.page_number).max().unwrap_or(0)
    }

    /// Check if the document has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
