//! Section types produced by the layout classifier and enriched by the
//! scoring and ranking stages.
//!
//! A [`Section`] never changes after classification. Scoring wraps it in
//! [`Scored`], ranking in [`Ranked`], so no stage sees a half-filled entity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level assigned by the layout classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Level for the n-th largest heading size (0-based), if any.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::H1),
            1 => Some(Self::H2),
            2 => Some(Self::H3),
            _ => None,
        }
    }

    /// Numeric level (1-3).
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A detected heading-anchored unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Trimmed heading text
    pub title: String,
    /// Heading level
    pub level: HeadingLevel,
    /// Page the heading appears on (1-indexed)
    pub page_number: u32,
    /// Section body; equals `title` when the layout carries nothing richer
    pub text: String,
}

impl Section {
    /// Create a section whose body is its own title.
    pub fn heading(title: impl Into<String>, level: HeadingLevel, page_number: u32) -> Self {
        let title = title.into();
        Self {
            text: title.clone(),
            title,
            level,
            page_number,
        }
    }

    /// Replace the section body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// A section tagged with the document it came from.
///
/// `ordinal` is the detection index inside that document and, together with
/// `document_id`, gives every section a stable identity for tie-breaking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    /// Source document identifier
    pub document_id: String,
    /// Detection order within the document (0-based)
    pub ordinal: usize,
    /// The detected section
    pub section: Section,
}

impl DocumentSection {
    /// Tag a section with its document.
    pub fn new(document_id: impl Into<String>, ordinal: usize, section: Section) -> Self {
        Self {
            document_id: document_id.into(),
            ordinal,
            section,
        }
    }
}

/// A section with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    /// The scored section
    pub item: DocumentSection,
    /// Relevance score under the resolved strategy
    pub score: f64,
}

/// A scored section with its importance rank (1-based, dense).
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    /// The ranked section
    pub item: DocumentSection,
    /// Relevance score under the resolved strategy
    pub score: f64,
    /// Importance rank, 1 = most relevant
    pub rank: u32,
}

impl Ranked {
    /// Shorthand for the inner section.
    pub fn section(&self) -> &Section {
        &self.item.section
    }

    /// Shorthand for the source document id.
    pub fn document_id(&self) -> &str {
        &self.item.document_id
    }
}

/// Condensed text for one ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Source document identifier
    pub document_id: String,
    /// Bounded-length summary text
    pub refined_text: String,
    /// Page of the summarized section
    pub page_number: u32,
}
