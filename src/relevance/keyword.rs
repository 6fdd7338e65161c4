//! Exact-token keyword overlap scoring.

use std::collections::HashSet;

use regex::Regex;

use crate::model::{Query, Section};

/// Scores a section by how many distinct lowercase word tokens it shares
/// with the query. Tokens are compared whole; there is no stemming.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    word_regex: Regex,
}

impl KeywordScorer {
    /// Create a keyword scorer.
    pub fn new() -> Self {
        Self {
            word_regex: Regex::new(r"\w+").unwrap(),
        }
    }

    /// Lowercase the text and collect its distinct word tokens.
    pub fn tokenize(&self, text: &str) -> HashSet<String> {
        let lowered = text.to_lowercase();
        self.word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Tokens shared by the section and the query.
    pub fn overlap(&self, section: &Section, query: &Query) -> HashSet<String> {
        let section_tokens = self.tokenize(&format!("{} {}", section.title, section.text));
        let query_tokens = self.tokenize(&format!("{} {}", query.persona, query.job));
        section_tokens
            .intersection(&query_tokens)
            .cloned()
            .collect()
    }

    /// Size of the token overlap.
    pub fn score(&self, section: &Section, query: &Query) -> f64 {
        self.overlap(section, query).len() as f64
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new()
    }
}
