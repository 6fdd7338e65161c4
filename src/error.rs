//! Error types for sectionrank.

use std::io;
use thiserror::Error;

/// Result type alias for sectionrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or running the pipeline.
///
/// Failures of individual scoring or summarization calls are not represented
/// here: they are recovered where they happen (see [`crate::llm::JudgeError`]
/// and [`crate::relevance::EmbeddingError`]).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in an input file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that parsed but does not have the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Both persona and job-to-be-done are empty.
    #[error("Query is empty: persona and job_to_be_done must not both be blank")]
    EmptyQuery,

    /// The pipeline was given no documents to analyze.
    #[error("No documents to analyze")]
    NoDocuments,

    /// An option value could not be parsed.
    #[error("Invalid option value for {option}: {value}")]
    InvalidOption {
        /// Option name
        option: &'static str,
        /// Rejected value
        value: String,
    },

    /// Error while serializing the output record.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoDocuments;
        assert_eq!(err.to_string(), "No documents to analyze");

        let err = Error::InvalidOption {
            option: "method",
            value: "fuzzy".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid option value for method: fuzzy");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
