//! Data model for the analysis pipeline.
//!
//! Spans come in from an external layout reader, sections are produced by the
//! layout classifier, and the output record is what gets written at the end.

mod output;
mod query;
mod section;
mod span;

pub use output::{AnalysisOutput, ExtractedSection, OutputMetadata, SubsectionAnalysis};
pub use query::{flatten_field, Query};
pub use section::{DocumentSection, HeadingLevel, Ranked, Scored, Section, Summary};
pub use span::{DocumentLayout, Span};
