//! Pipeline orchestration.
//!
//! Runs the layout classifier per document, merges the detected sections,
//! scores and ranks the full set, keeps the top N and summarizes them.
//! Strategies are resolved once per run from [`AnalysisOptions`] and the
//! [`Capabilities`] the caller supplies.

mod options;
mod report;

pub use options::{AnalysisOptions, Approach, Method, DEFAULT_TOP_N};
pub use report::{AnalysisReport, TIMESTAMP_FORMAT};

use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::layout::LayoutClassifier;
use crate::llm::{CommandJudge, LanguageModel};
use crate::model::{DocumentLayout, DocumentSection, Query, Scored};
use crate::rank;
use crate::relevance::{EmbeddingModel, EmbeddingScorer, JudgeScorer, KeywordScorer, Scorer};
use crate::summarize::{ExtractiveSummarizer, JudgeSummarizer, Summarizer};

/// Externally loaded capabilities available to a run.
///
/// Both are shared read-only for the lifetime of the pipeline.
#[derive(Clone, Default)]
pub struct Capabilities {
    /// Loaded embedding model, if any
    pub embedding: Option<Arc<dyn EmbeddingModel>>,
    /// Language-model judge; the llm approach spawns [`CommandJudge`] if unset
    pub judge: Option<Arc<dyn LanguageModel>>,
}

impl Capabilities {
    /// No external capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an embedding model.
    pub fn with_embedding(mut self, model: Arc<dyn EmbeddingModel>) -> Self {
        self.embedding = Some(model);
        self
    }

    /// Provide a language-model judge.
    pub fn with_judge(mut self, judge: Arc<dyn LanguageModel>) -> Self {
        self.judge = Some(judge);
        self
    }

    /// Whether an embedding model is loaded.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("embedding", &self.embedding.as_ref().map(|m| m.name().to_string()))
            .field("judge", &self.judge.as_ref().map(|j| j.name().to_string()))
            .finish()
    }
}

/// The analysis pipeline.
pub struct Pipeline {
    options: AnalysisOptions,
    capabilities: Capabilities,
    classifier: LayoutClassifier,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(options: AnalysisOptions, capabilities: Capabilities) -> Self {
        let classifier = LayoutClassifier::new(options.layout.clone());
        Self {
            options,
            capabilities,
            classifier,
        }
    }

    /// Get the analysis options.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Get the classifier.
    pub fn classifier(&self) -> &LayoutClassifier {
        &self.classifier
    }

    fn judge(&self) -> Arc<dyn LanguageModel> {
        self.capabilities
            .judge
            .clone()
            .unwrap_or_else(|| Arc::new(CommandJudge::new(self.options.judge.clone())))
    }

    /// Resolve the scoring strategy for a query.
    ///
    /// `auto` and `embedding` both become keyword scoring when no embedding
    /// model is loaded, or when the model cannot encode the query.
    pub fn resolve_scorer(&self, query: &Query) -> Scorer {
        if self.options.approach == Approach::Llm {
            return Scorer::Judge(JudgeScorer::new(
                self.judge(),
                self.options.judge.score_timeout,
            ));
        }

        if self.options.method == Method::Keyword {
            return Scorer::Keyword(KeywordScorer::new());
        }

        match &self.capabilities.embedding {
            Some(model) => match EmbeddingScorer::new(Arc::clone(model), query) {
                Ok(scorer) => Scorer::Embedding(scorer),
                Err(e) => {
                    log::warn!(
                        "Embedding model {} cannot encode the query ({}); using keyword scoring",
                        model.name(),
                        e
                    );
                    Scorer::Keyword(KeywordScorer::new())
                }
            },
            None => {
                if self.options.method == Method::Embedding {
                    log::warn!("No embedding model loaded; using keyword scoring");
                }
                Scorer::Keyword(KeywordScorer::new())
            }
        }
    }

    /// Resolve the summarization strategy.
    pub fn resolve_summarizer(&self) -> Summarizer {
        let judge = &self.options.judge;
        match self.options.approach {
            Approach::Nlp => {
                Summarizer::Extractive(ExtractiveSummarizer::new(judge.fallback_chars))
            }
            Approach::Llm => Summarizer::Judge(JudgeSummarizer::new(
                self.judge(),
                judge.summary_timeout,
                judge.summary_max_chars,
                judge.fallback_chars,
            )),
        }
    }

    /// Detect sections in every document and merge them in document order.
    pub fn detect_sections(&self, documents: &[DocumentLayout]) -> Vec<DocumentSection> {
        let classify = |layout: &DocumentLayout| -> Vec<DocumentSection> {
            let sections = self.classifier.classify(&layout.spans);
            log::debug!("{}: {} sections detected", layout.id, sections.len());
            sections
                .into_iter()
                .enumerate()
                .map(|(ordinal, section)| DocumentSection::new(layout.id.clone(), ordinal, section))
                .collect()
        };

        let per_document: Vec<Vec<DocumentSection>> = if self.options.parallel {
            documents.par_iter().map(classify).collect()
        } else {
            documents.iter().map(classify).collect()
        };

        per_document.into_iter().flatten().collect()
    }

    /// Score every section with the resolved strategy.
    pub fn score_sections(
        &self,
        sections: Vec<DocumentSection>,
        query: &Query,
        scorer: &Scorer,
    ) -> Vec<Scored> {
        let score = |item: DocumentSection| Scored {
            score: scorer.score(&item.section, query),
            item,
        };

        if self.options.parallel && scorer.is_parallel_safe() {
            sections.into_par_iter().map(score).collect()
        } else {
            sections.into_iter().map(score).collect()
        }
    }

    /// Run the full analysis.
    ///
    /// Fails only on systemic problems (no documents, blank query). An empty
    /// section list is a valid outcome and yields an empty report.
    pub fn run(&self, documents: &[DocumentLayout], query: &Query) -> Result<AnalysisReport> {
        if documents.is_empty() {
            return Err(Error::NoDocuments);
        }
        query.validate()?;

        let sections = self.detect_sections(documents);
        let total_sections = sections.len();
        log::info!(
            "Detected {} sections across {} documents",
            total_sections,
            documents.len()
        );

        let scorer = self.resolve_scorer(query);
        log::info!(
            "Scoring with {} ({} approach)",
            scorer.method(),
            self.options.approach
        );
        let scored = self.score_sections(sections, query, &scorer);

        let ranked = rank::take_top(rank::rank(scored), self.options.top_n);

        let summaries = self.resolve_summarizer().summarize_ranked(&ranked, query);

        Ok(AnalysisReport {
            documents: documents.iter().map(|d| d.id.clone()).collect(),
            query: query.clone(),
            approach: self.options.approach,
            method: scorer.method(),
            total_sections,
            ranked,
            summaries,
            timestamp: Utc::now(),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(AnalysisOptions::default(), Capabilities::default())
    }
}
