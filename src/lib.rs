//! # sectionrank
//!
//! Persona-driven section ranking for document collections.
//!
//! Given per-document text layouts (spans with font size and page number)
//! and a query made of a persona and a job-to-be-done, this library detects
//! section headings, scores every section against the query, ranks them
//! and summarizes the most relevant ones into a single output record.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sectionrank::{analyze_dir, render, AnalysisOptions, Capabilities};
//!
//! fn main() -> sectionrank::Result<()> {
//!     let report = analyze_dir("collection/", AnalysisOptions::default(), Capabilities::new())?;
//!
//!     let json = render::to_json(&report.to_output(), render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout classification**: headings from font-size tiers, all-caps lines and numbering
//! - **Pluggable relevance**: keyword overlap, embedding similarity or a language-model judge
//! - **Deterministic ranking**: dense ranks with a stable tie-break
//! - **Summaries**: extractive or judge-written, never empty for a non-empty section
//! - **Parallel processing**: uses Rayon across documents and sections

pub mod error;
pub mod input;
pub mod layout;
pub mod llm;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod relevance;
pub mod render;
pub mod summarize;

// Re-export commonly used types
pub use error::{Error, Result};
pub use input::{
    discover_layouts, load_collection, load_layout, load_query, Collection, OUTPUT_FILE_PREFIX,
    QUERY_FILE,
};
pub use layout::{LayoutClassifier, LayoutOptions};
pub use llm::{CommandJudge, JudgeError, JudgeOptions, LanguageModel};
pub use model::{
    AnalysisOutput, DocumentLayout, DocumentSection, HeadingLevel, Query, Ranked, Scored, Section,
    Span, Summary,
};
pub use pipeline::{AnalysisOptions, AnalysisReport, Approach, Capabilities, Method, Pipeline};
pub use relevance::{EmbeddingError, EmbeddingModel, ScoringMethod};
pub use render::JsonFormat;

use std::path::Path;
use std::sync::Arc;

/// Analyze already loaded documents against a query.
///
/// Uses keyword scoring unless `options` selects the judge; pass
/// [`Capabilities`] through [`Pipeline`] to use an embedding model.
///
/// # Example
///
/// ```
/// use sectionrank::{analyze, AnalysisOptions, DocumentLayout, Query, Span};
///
/// let docs = vec![DocumentLayout::new(
///     "guide.pdf",
///     vec![
///         Span::new("BEACHES", 10.0, 1),
///         Span::new("Sand and sun on the coast.", 10.0, 1),
///     ],
/// )];
/// let query = Query::new("Traveler", "Find beaches");
///
/// let report = analyze(&docs, &query, AnalysisOptions::default()).unwrap();
/// assert_eq!(report.ranked[0].section().title, "BEACHES");
/// ```
pub fn analyze(
    documents: &[DocumentLayout],
    query: &Query,
    options: AnalysisOptions,
) -> Result<AnalysisReport> {
    Pipeline::new(options, Capabilities::new()).run(documents, query)
}

/// Load an input directory and analyze it.
pub fn analyze_dir<P: AsRef<Path>>(
    dir: P,
    options: AnalysisOptions,
    capabilities: Capabilities,
) -> Result<AnalysisReport> {
    let collection = load_collection(dir)?;
    Pipeline::new(options, capabilities).run(&collection.documents, &collection.query)
}

/// Builder-style API for one analysis run.
///
/// # Example
///
/// ```no_run
/// use sectionrank::SectionRank;
///
/// let report = SectionRank::new()
///     .with_top_n(3)
///     .sequential()
///     .analyze_dir("collection/")
///     .unwrap();
/// println!("{}", report.output_file_name());
/// ```
#[derive(Debug, Default)]
pub struct SectionRank {
    options: AnalysisOptions,
    capabilities: Capabilities,
}

impl SectionRank {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the language-model judge for scoring and summaries.
    pub fn llm(mut self) -> Self {
        self.options = self.options.llm();
        self
    }

    /// Set the nlp scoring method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.options = self.options.with_method(method);
        self
    }

    /// Set how many top sections to keep.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.options = self.options.with_top_n(top_n);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set judge options.
    pub fn with_judge_options(mut self, judge: JudgeOptions) -> Self {
        self.options = self.options.with_judge(judge);
        self
    }

    /// Provide an embedding model.
    pub fn with_embedding(mut self, model: Arc<dyn EmbeddingModel>) -> Self {
        self.capabilities = self.capabilities.with_embedding(model);
        self
    }

    /// Provide a language-model judge in place of the spawned command.
    pub fn with_judge(mut self, judge: Arc<dyn LanguageModel>) -> Self {
        self.capabilities = self.capabilities.with_judge(judge);
        self
    }

    /// Get the configured options.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline::new(self.options, self.capabilities)
    }

    /// Analyze loaded documents.
    pub fn analyze(self, documents: &[DocumentLayout], query: &Query) -> Result<AnalysisReport> {
        self.build().run(documents, query)
    }

    /// Load an input directory and analyze it.
    pub fn analyze_dir<P: AsRef<Path>>(self, dir: P) -> Result<AnalysisReport> {
        let collection = load_collection(dir)?;
        self.analyze(&collection.documents, &collection.query)
    }
}
