//! Relevance rating by an external language-model judge.

use std::sync::Arc;
use std::time::Duration;

use crate::llm::{parse_rating, rating_prompt, JudgeError, LanguageModel};
use crate::model::{Query, Section};

/// Score used whenever the judge cannot produce a rating.
pub const FALLBACK_RATING: f64 = 1.0;

/// Asks the judge for a 1-10 rating of each section.
#[derive(Clone)]
pub struct JudgeScorer {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
}

impl JudgeScorer {
    /// Create a scorer with a per-call timeout.
    pub fn new(model: Arc<dyn LanguageModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Rating in `1..=10`, or the reason there is none.
    pub fn try_score(&self, section: &Section, query: &Query) -> Result<u8, JudgeError> {
        let output = self
            .model
            .complete(&rating_prompt(section, query), self.timeout)?;
        parse_rating(&output)
    }

    /// Rating in `1..=10`; any judge failure rates the section 1.
    pub fn score(&self, section: &Section, query: &Query) -> f64 {
        match self.try_score(section, query) {
            Ok(rating) => f64::from(rating),
            Err(e) => {
                log::warn!(
                    "Judge {} could not rate section {:?}: {}",
                    self.model.name(),
                    section.title,
                    e
                );
                FALLBACK_RATING
            }
        }
    }
}

impl std::fmt::Debug for JudgeScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeScorer")
            .field("model", &self.model.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    /// Answers every prompt with a fixed result.
    struct ScriptedJudge(fn() -> Result<String, JudgeError>);

    impl LanguageModel for ScriptedJudge {
        fn name(&self) -> &str {
            "scripted"
        }

        fn complete(&self, _prompt: &str, _timeout: Duration) -> Result<String, JudgeError> {
            (self.0)()
        }
    }

    fn score_with(answer: fn() -> Result<String, JudgeError>) -> f64 {
        let scorer = JudgeScorer::new(Arc::new(ScriptedJudge(answer)), Duration::from_secs(10));
        let section = Section::heading("Beaches", HeadingLevel::H2, 4);
        scorer.score(&section, &Query::new("traveler", "find beaches"))
    }

    #[test]
    fn test_rating_is_parsed() {
        assert_eq!(score_with(|| Ok("{\"score\": 9}".to_string())), 9.0);
    }

    #[test]
    fn test_timeout_rates_one() {
        assert_eq!(
            score_with(|| Err(JudgeError::Timeout(Duration::from_secs(10)))),
            FALLBACK_RATING
        );
    }

    #[test]
    fn test_nonzero_exit_rates_one() {
        assert_eq!(
            score_with(|| Err(JudgeError::NonZeroExit {
                code: Some(1),
                stderr: "model not found".into()
            })),
            FALLBACK_RATING
        );
    }

    #[test]
    fn test_unparsable_output_rates_one() {
        assert_eq!(score_with(|| Ok("highly relevant".to_string())), FALLBACK_RATING);
    }

    #[test]
    fn test_try_score_exposes_failure_mode() {
        let scorer = JudgeScorer::new(
            Arc::new(ScriptedJudge(|| Ok("n/a".to_string()))),
            Duration::from_secs(1),
        );
        let section = Section::heading("Beaches", HeadingLevel::H2, 4);
        let err = scorer
            .try_score(&section, &Query::new("traveler", "find beaches"))
            .unwrap_err();
        assert!(matches!(err, JudgeError::UnparsableOutput(_)));
    }
}
