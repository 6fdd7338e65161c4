//! Semantic similarity scoring through an embedding capability.

use std::sync::Arc;

use thiserror::Error;

use crate::model::{Query, Section};

/// Score given to a section that cannot be embedded.
pub const UNSCORABLE_SIMILARITY: f64 = -1.0;

/// Errors from an embedding capability.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The model failed to encode the text.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// Two vectors that should be comparable are not.
    #[error("dimension mismatch: {0} vs {1}")]
    DimensionMismatch(usize, usize),
}

/// A sentence-embedding model.
///
/// Loaded once per process and shared read-only by every scoring call, so
/// implementations must not need `&mut self` to encode.
pub trait EmbeddingModel: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Encode text into a fixed-length vector.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Cosine similarity of two vectors, clamped to `[-1, 1]`.
///
/// A zero vector has no direction and is treated as orthogonal to everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch(a.len(), b.len()));
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// Scores sections by cosine similarity between the embedded query and the
/// embedded section.
///
/// The query is encoded once, when the scorer is built; each scoring call
/// encodes only the section.
#[derive(Clone)]
pub struct EmbeddingScorer {
    model: Arc<dyn EmbeddingModel>,
    query_vector: Arc<[f32]>,
}

impl EmbeddingScorer {
    /// Create a scorer for one query over a loaded model.
    ///
    /// Fails if the model cannot encode the query.
    pub fn new(model: Arc<dyn EmbeddingModel>, query: &Query) -> Result<Self, EmbeddingError> {
        let query_vector = model.encode(&Self::query_text(query))?.into();
        Ok(Self {
            model,
            query_vector,
        })
    }

    /// The underlying model.
    pub fn model(&self) -> &dyn EmbeddingModel {
        self.model.as_ref()
    }

    /// The encoded query.
    pub fn query_vector(&self) -> &[f32] {
        &self.query_vector
    }

    /// Text encoded for the query side.
    pub fn query_text(query: &Query) -> String {
        format!("{}. {}", query.persona, query.job)
    }

    /// Text encoded for the section side.
    pub fn section_text(section: &Section) -> String {
        format!("{}. {}", section.title, section.text)
    }

    /// Similarity in `[-1, 1]`, or an error if the section fails to encode.
    pub fn try_score(&self, section: &Section) -> Result<f64, EmbeddingError> {
        let section_vec = self.model.encode(&Self::section_text(section))?;
        cosine_similarity(&self.query_vector, &section_vec)
    }

    /// Similarity in `[-1, 1]`; sections that cannot be encoded get the
    /// lowest possible similarity.
    pub fn score(&self, section: &Section) -> f64 {
        self.try_score(section).unwrap_or_else(|e| {
            log::warn!(
                "Embedding failed for section {:?} ({}); scoring as {}",
                section.title,
                e,
                UNSCORABLE_SIMILARITY
            );
            UNSCORABLE_SIMILARITY
        })
    }
}

impl std::fmt::Debug for EmbeddingScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingScorer")
            .field("model", &self.model.name())
            .field("dimensions", &self.query_vector.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::model::HeadingLevel;

    /// Embeds text as counts of a few fixed words.
    struct WordCountModel;

    impl EmbeddingModel for WordCountModel {
        fn name(&self) -> &str {
            "word-count"
        }

        fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let text = text.to_lowercase();
            Ok(["beach", "museum", "food"]
                .iter()
                .map(|w| text.matches(w).count() as f32)
                .collect())
        }
    }

    struct BrokenModel;

    /// Counts encode calls; fails on texts containing "broken".
    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl EmbeddingModel for CountingModel {
        fn name(&self) -> &str {
            "counting"
        }

        fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("broken") {
                return Err(EmbeddingError::Encode("unreadable".into()));
            }
            Ok(vec![1.0, text.len() as f32])
        }
    }

    impl EmbeddingModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::Encode("model not loaded".into()))
        }
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let err = cosine_similarity(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, EmbeddingError::DimensionMismatch(1, 2)));
    }

    #[test]
    fn test_embedding_score_in_range_and_deterministic() {
        let query = Query::new("foodie", "find beach food");
        let scorer = EmbeddingScorer::new(Arc::new(WordCountModel), &query).unwrap();
        let section = Section::heading("Beach Bars", HeadingLevel::H2, 2)
            .with_text("Food by the beach.");

        let first = scorer.score(&section);
        let second = scorer.score(&section);
        assert_eq!(first, second);
        assert!((-1.0..=1.0).contains(&first));
        assert!((first - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_encode_failure_scores_lowest() {
        let model = Arc::new(CountingModel::default());
        let scorer = EmbeddingScorer::new(model, &Query::new("a", "b")).unwrap();
        let section = Section::heading("Museums", HeadingLevel::H1, 1).with_text("broken scan");
        assert_eq!(scorer.score(&section), UNSCORABLE_SIMILARITY);
    }

    #[test]
    fn test_query_encode_failure_is_an_error() {
        let result = EmbeddingScorer::new(Arc::new(BrokenModel), &Query::new("a", "b"));
        assert!(matches!(result, Err(EmbeddingError::Encode(_))));
    }

    #[test]
    fn test_query_is_encoded_once() {
        let model = Arc::new(CountingModel::default());
        let scorer = EmbeddingScorer::new(model.clone(), &Query::new("chef", "plan a menu")).unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(scorer.query_vector().len(), 2);

        for page in 1..=4 {
            let section = Section::heading("Soups", HeadingLevel::H2, page);
            scorer.score(&section);
        }
        assert_eq!(model.calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_encoded_texts() {
        let query = Query::new("chef", "plan a menu");
        assert_eq!(EmbeddingScorer::query_text(&query), "chef. plan a menu");
        let section = Section::heading("Soups", HeadingLevel::H2, 1).with_text("Hot soups.");
        assert_eq!(EmbeddingScorer::section_text(&section), "Soups. Hot soups.");
    }
}
