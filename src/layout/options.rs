//! Layout classification options.

/// Options controlling heading detection.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Spans whose trimmed text is shorter than this are never headings
    pub min_title_chars: usize,

    /// All-caps titles must have fewer whitespace-separated words than this
    pub max_caps_words: usize,

    /// Leave the dominant (body text) font size out of the size-to-level map.
    /// Other sizes, larger or smaller, stay candidates.
    pub exclude_body_size: bool,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum title length in characters.
    pub fn with_min_title_chars(mut self, chars: usize) -> Self {
        self.min_title_chars = chars;
        self
    }

    /// Set the all-caps word limit.
    pub fn with_max_caps_words(mut self, words: usize) -> Self {
        self.max_caps_words = words;
        self
    }

    /// Map every distinct font size, including body text, to a level.
    pub fn include_body_size(mut self) -> Self {
        self.exclude_body_size = false;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_title_chars: 3,
            max_caps_words: 10,
            exclude_body_size: true,
        }
    }
}
