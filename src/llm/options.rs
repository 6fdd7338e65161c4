//! Judge process options.

use std::time::Duration;

/// How to invoke the external language-model judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeOptions {
    /// Executable to run
    pub program: String,

    /// Model name passed to the executable
    pub model: String,

    /// Extra arguments appended after the model name
    pub extra_args: Vec<String>,

    /// Upper bound for one relevance rating
    pub score_timeout: Duration,

    /// Upper bound for one summary (summaries are longer generations)
    pub summary_timeout: Duration,

    /// Maximum characters kept from a generated summary
    pub summary_max_chars: usize,

    /// Characters of raw section text used when a summary cannot be produced
    pub fallback_chars: usize,
}

impl JudgeOptions {
    /// Create judge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the extra arguments.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the rating timeout.
    pub fn with_score_timeout(mut self, timeout: Duration) -> Self {
        self.score_timeout = timeout;
        self
    }

    /// Set the summary timeout.
    pub fn with_summary_timeout(mut self, timeout: Duration) -> Self {
        self.summary_timeout = timeout;
        self
    }

    /// Full argument list: `run <model> <extra args...>`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string(), self.model.clone()];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl Default for JudgeOptions {
    fn default() -> Self {
        Self {
            program: "ollama".to_string(),
            model: "gemma3:1b".to_string(),
            extra_args: vec!["--format".to_string(), "json".to_string()],
            score_timeout: Duration::from_secs(10),
            summary_timeout: Duration::from_secs(20),
            summary_max_chars: 400,
            fallback_chars: 200,
        }
    }
}
