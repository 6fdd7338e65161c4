//! Result of one analysis run.

use chrono::{DateTime, Utc};

use crate::input::OUTPUT_FILE_PREFIX;
use crate::model::{
    AnalysisOutput, ExtractedSection, OutputMetadata, Query, Ranked, SubsectionAnalysis, Summary,
};
use crate::relevance::ScoringMethod;

use super::options::Approach;

/// Timestamp layout of the output record (ISO-8601, UTC, no offset).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Everything an analysis run produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Analyzed document ids, in input order
    pub documents: Vec<String>,
    /// The query sections were ranked against
    pub query: Query,
    /// Approach used
    pub approach: Approach,
    /// Scoring strategy actually used
    pub method: ScoringMethod,
    /// Number of sections detected across all documents
    pub total_sections: usize,
    /// Top-ranked sections, rank order
    pub ranked: Vec<Ranked>,
    /// Summaries of `ranked`, index-aligned
    pub summaries: Vec<Summary>,
    /// When the run finished
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    /// Build the output record.
    pub fn to_output(&self) -> AnalysisOutput {
        AnalysisOutput {
            metadata: OutputMetadata {
                input_documents: self.documents.clone(),
                persona: self.query.persona.clone(),
                job_to_be_done: self.query.job.clone(),
                processing_timestamp: self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            },
            extracted_sections: self
                .ranked
                .iter()
                .map(|r| ExtractedSection {
                    document: r.document_id().to_string(),
                    section_title: r.section().title.clone(),
                    importance_rank: r.rank,
                    page_number: r.section().page_number,
                })
                .collect(),
            subsection_analysis: self
                .summaries
                .iter()
                .map(|s| SubsectionAnalysis {
                    document: s.document_id.clone(),
                    refined_text: s.refined_text.clone(),
                    page_number: s.page_number,
                })
                .collect(),
        }
    }

    /// Conventional output file name for this run.
    pub fn output_file_name(&self) -> String {
        match self.approach {
            Approach::Llm => format!("{}llm.json", OUTPUT_FILE_PREFIX),
            Approach::Nlp => format!("{}nlp_{}.json", OUTPUT_FILE_PREFIX, self.method),
        }
    }
}
