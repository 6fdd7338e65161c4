//! Summarization of ranked sections.
//!
//! The extractive strategy keeps the opening sentences of the section body.
//! The judge strategy asks the language model for a persona-focused summary
//! and falls back to the raw body when that fails. Either way the summary of
//! a non-empty body is never empty.

mod sentences;

pub use sentences::{first_sentences, split_sentences, truncate_chars};

use std::sync::Arc;
use std::time::Duration;

use crate::llm::{summary_prompt, JudgeError, LanguageModel};
use crate::model::{Query, Ranked, Section, Summary};

/// Leading sentences kept by the extractive strategy.
pub const EXTRACTIVE_SENTENCES: usize = 2;

/// Leading sentences kept from a judge-written summary.
pub const JUDGE_SENTENCES: usize = 3;

/// First-sentences summarizer.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    fallback_chars: usize,
}

impl ExtractiveSummarizer {
    /// Create an extractive summarizer.
    pub fn new(fallback_chars: usize) -> Self {
        Self { fallback_chars }
    }

    /// The first two sentences of the body, or its first characters if that
    /// comes out empty.
    pub fn summarize(&self, section: &Section) -> String {
        let summary = first_sentences(&section.text, EXTRACTIVE_SENTENCES);
        if summary.is_empty() {
            truncate_chars(&section.text, self.fallback_chars)
        } else {
            summary
        }
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(200)
    }
}

/// Summarizer backed by the language-model judge.
#[derive(Clone)]
pub struct JudgeSummarizer {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
    max_chars: usize,
    fallback_chars: usize,
}

impl JudgeSummarizer {
    /// Create a judge summarizer.
    pub fn new(
        model: Arc<dyn LanguageModel>,
        timeout: Duration,
        max_chars: usize,
        fallback_chars: usize,
    ) -> Self {
        Self {
            model,
            timeout,
            max_chars,
            fallback_chars,
        }
    }

    /// The judge's summary cut to three sentences and `max_chars`, or why
    /// there is none.
    pub fn try_summarize(&self, section: &Section, query: &Query) -> Result<String, JudgeError> {
        let output = self
            .model
            .complete(&summary_prompt(section, query), self.timeout)?;
        let summary = truncate_chars(&first_sentences(&output, JUDGE_SENTENCES), self.max_chars);
        if summary.trim().is_empty() {
            return Err(JudgeError::UnparsableOutput(output));
        }
        Ok(summary)
    }

    /// Judge summary, or the start of the raw body on any failure.
    pub fn summarize(&self, section: &Section, query: &Query) -> String {
        self.try_summarize(section, query).unwrap_or_else(|e| {
            log::warn!(
                "Judge {} could not summarize section {:?}: {}",
                self.model.name(),
                section.title,
                e
            );
            truncate_chars(&section.text, self.fallback_chars)
        })
    }
}

impl std::fmt::Debug for JudgeSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeSummarizer")
            .field("model", &self.model.name())
            .field("timeout", &self.timeout)
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

/// A resolved summarization strategy.
#[derive(Debug, Clone)]
pub enum Summarizer {
    /// Leading sentences of the body
    Extractive(ExtractiveSummarizer),
    /// Language-model summary
    Judge(JudgeSummarizer),
}

impl Summarizer {
    /// Summarize one section.
    pub fn summarize(&self, section: &Section, query: &Query) -> String {
        match self {
            Self::Extractive(s) => s.summarize(section),
            Self::Judge(s) => s.summarize(section, query),
        }
    }

    /// Summarize ranked sections, keeping their order.
    pub fn summarize_ranked(&self, ranked: &[Ranked], query: &Query) -> Vec<Summary> {
        ranked
            .iter()
            .map(|r| Summary {
                document_id: r.document_id().to_string(),
                refined_text: self.summarize(r.section(), query),
                page_number: r.section().page_number,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentSection, HeadingLevel};

    fn body(text: &str) -> Section {
        Section::heading("Title", HeadingLevel::H2, 2).with_text(text)
    }

    struct ScriptedJudge(fn() -> Result<String, JudgeError>);

    impl LanguageModel for ScriptedJudge {
        fn name(&self) -> &str {
            "scripted"
        }

        fn complete(&self, _prompt: &str, _timeout: Duration) -> Result<String, JudgeError> {
            (self.0)()
        }
    }

    fn judge(answer: fn() -> Result<String, JudgeError>) -> JudgeSummarizer {
        JudgeSummarizer::new(Arc::new(ScriptedJudge(answer)), Duration::from_secs(20), 400, 200)
    }

    #[test]
    fn test_extractive_first_two_sentences() {
        let summarizer = ExtractiveSummarizer::default();
        let section = body("Nice is sunny. The beaches are pebbly. Bring shoes.");
        assert_eq!(
            summarizer.summarize(&section),
            "Nice is sunny. The beaches are pebbly."
        );
    }

    #[test]
    fn test_extractive_without_punctuation_keeps_text() {
        let summarizer = ExtractiveSummarizer::default();
        assert_eq!(summarizer.summarize(&body("COASTAL TOWNS")), "COASTAL TOWNS");
    }

    #[test]
    fn test_extractive_whitespace_body_falls_back_to_raw_text() {
        let summarizer = ExtractiveSummarizer::default();
        assert_eq!(summarizer.summarize(&body("   ")), "   ");
    }

    #[test]
    fn test_extractive_length_bound() {
        let summarizer = ExtractiveSummarizer::default();
        let long = "word ".repeat(100);
        let text = format!("{}. Second. Third.", long.trim());
        let summary = summarizer.summarize(&body(&text));
        let two = first_sentences(&text, 2);
        assert!(!summary.is_empty());
        assert!(summary.chars().count() <= two.chars().count().max(200));
    }

    #[test]
    fn test_judge_summary_trimmed_to_three_sentences() {
        let summarizer = judge(|| Ok("One. Two. Three. Four.".to_string()));
        let section = body("Raw text.");
        assert_eq!(
            summarizer.summarize(&section, &Query::new("p", "j")),
            "One. Two. Three."
        );
    }

    #[test]
    fn test_judge_summary_truncated_to_max_chars() {
        let summarizer = judge(|| Ok("x".repeat(1000)));
        let summary = summarizer.summarize(&body("Raw text."), &Query::new("p", "j"));
        assert_eq!(summary.chars().count(), 400);
    }

    #[test]
    fn test_judge_failure_falls_back_to_raw_text() {
        let summarizer = judge(|| Err(JudgeError::Timeout(Duration::from_secs(20))));
        let text = "y".repeat(300);
        let summary = summarizer.summarize(&body(&text), &Query::new("p", "j"));
        assert_eq!(summary, "y".repeat(200));
    }

    #[test]
    fn test_judge_empty_output_falls_back() {
        let summarizer = judge(|| Ok("  ".to_string()));
        let section = body("Raw text.");
        let err = summarizer
            .try_summarize(&section, &Query::new("p", "j"))
            .unwrap_err();
        assert!(matches!(err, JudgeError::UnparsableOutput(_)));
        assert_eq!(summarizer.summarize(&section, &Query::new("p", "j")), "Raw text.");
    }

    #[test]
    fn test_summarize_ranked_preserves_order() {
        let ranked: Vec<Ranked> = ["b.pdf", "a.pdf", "c.pdf"]
            .iter()
            .enumerate()
            .map(|(i, doc)| Ranked {
                item: DocumentSection::new(
                    *doc,
                    0,
                    Section::heading(format!("Heading {i}"), HeadingLevel::H1, i as u32 + 1),
                ),
                score: 1.0,
                rank: i as u32 + 1,
            })
            .collect();

        let summaries = Summarizer::Extractive(ExtractiveSummarizer::default())
            .summarize_ranked(&ranked, &Query::new("p", "j"));

        let docs: Vec<_> = summaries.iter().map(|s| s.document_id.as_str()).collect();
        assert_eq!(docs, vec!["b.pdf", "a.pdf", "c.pdf"]);
        assert_eq!(summaries[1].refined_text, "Heading 1");
        assert_eq!(summaries[2].page_number, 3);
    }
}
