//! Relevance scoring strategies.
//!
//! A [`Scorer`] is resolved once per run and then applied to every section.
//! Keyword scoring is always available; embedding and judge scoring depend
//! on capabilities supplied by the caller.

mod embedding;
mod judge;
mod keyword;

pub use embedding::{
    cosine_similarity, EmbeddingError, EmbeddingModel, EmbeddingScorer, UNSCORABLE_SIMILARITY,
};
pub use judge::{JudgeScorer, FALLBACK_RATING};
pub use keyword::KeywordScorer;

use std::fmt;

use crate::model::{Query, Section};

/// The scoring strategy a run actually used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringMethod {
    /// Token overlap
    Keyword,
    /// Embedding cosine similarity
    Embedding,
    /// Language-model judge rating
    Llm,
}

impl ScoringMethod {
    /// Lowercase name, as used in output file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Embedding => "embedding",
            Self::Llm => "llm",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved relevance scorer.
#[derive(Debug, Clone)]
pub enum Scorer {
    /// Token overlap count
    Keyword(KeywordScorer),
    /// Cosine similarity in `[-1, 1]`
    Embedding(EmbeddingScorer),
    /// Judge rating in `1..=10`
    Judge(JudgeScorer),
}

impl Scorer {
    /// Score a section against the query.
    ///
    /// An embedding scorer already holds its query, encoded when it was
    /// resolved, and ignores `query`.
    pub fn score(&self, section: &Section, query: &Query) -> f64 {
        match self {
            Self::Keyword(scorer) => scorer.score(section, query),
            Self::Embedding(scorer) => scorer.score(section),
            Self::Judge(scorer) => scorer.score(section, query),
        }
    }

    /// Which strategy this is.
    pub fn method(&self) -> ScoringMethod {
        match self {
            Self::Keyword(_) => ScoringMethod::Keyword,
            Self::Embedding(_) => ScoringMethod::Embedding,
            Self::Judge(_) => ScoringMethod::Llm,
        }
    }

    /// Whether scoring calls may run concurrently. Judge calls stay
    /// sequential so only one model process runs at a time.
    pub fn is_parallel_safe(&self) -> bool {
        !matches!(self, Self::Judge(_))
    }
}
