//! The result record handed to the output writer.

use serde::{Deserialize, Serialize};

/// Complete analysis output.
///
/// `extracted_sections` and `subsection_analysis` have the same length and
/// entry `i` of both describes the same ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Run metadata
    pub metadata: OutputMetadata,
    /// Top-ranked sections in rank order
    pub extracted_sections: Vec<ExtractedSection>,
    /// Summaries of the same sections, index-aligned
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// Identifiers of every analyzed document, in input order
    pub input_documents: Vec<String>,
    /// Flattened persona
    pub persona: String,
    /// Flattened job-to-be-done
    pub job_to_be_done: String,
    /// ISO-8601 processing time (UTC)
    pub processing_timestamp: String,
}

/// One ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document
    pub document: String,
    /// Heading text
    pub section_title: String,
    /// Dense 1-based rank
    pub importance_rank: u32,
    /// Page number (1-indexed)
    pub page_number: u32,
}

/// Summary of one ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document
    pub document: String,
    /// Condensed text
    pub refined_text: String,
    /// Page number (1-indexed)
    pub page_number: u32,
}
