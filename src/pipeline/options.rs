//! Analysis options and configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::layout::LayoutOptions;
use crate::llm::JudgeOptions;

/// Default number of sections kept after ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// Options for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Scorer/summarizer family
    pub approach: Approach,

    /// Scoring strategy within the nlp family
    pub method: Method,

    /// Number of ranked sections kept for summarization and output
    pub top_n: usize,

    /// Whether to classify and score in parallel
    pub parallel: bool,

    /// Heading detection options
    pub layout: LayoutOptions,

    /// Judge invocation options
    pub judge: JudgeOptions,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the approach.
    pub fn with_approach(mut self, approach: Approach) -> Self {
        self.approach = approach;
        self
    }

    /// Use the language-model judge for scoring and summaries.
    pub fn llm(mut self) -> Self {
        self.approach = Approach::Llm;
        self
    }

    /// Set the nlp scoring method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set how many top sections to keep.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set judge options.
    pub fn with_judge(mut self, judge: JudgeOptions) -> Self {
        self.judge = judge;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            approach: Approach::Nlp,
            method: Method::Auto,
            top_n: DEFAULT_TOP_N,
            parallel: true,
            layout: LayoutOptions::default(),
            judge: JudgeOptions::default(),
        }
    }
}

/// Scorer/summarizer family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Approach {
    /// Keyword or embedding scoring with extractive summaries
    #[default]
    Nlp,
    /// Judge scoring and judge summaries
    Llm,
}

impl Approach {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nlp => "nlp",
            Self::Llm => "llm",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Approach {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nlp" => Ok(Self::Nlp),
            "llm" => Ok(Self::Llm),
            _ => Err(Error::InvalidOption {
                option: "approach",
                value: s.to_string(),
            }),
        }
    }
}

/// Scoring strategy requested for the nlp approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Embedding when a model is available, otherwise keyword
    #[default]
    Auto,
    /// Token overlap
    Keyword,
    /// Embedding similarity (keyword if no model is available)
    Embedding,
}

impl Method {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Keyword => "keyword",
            Self::Embedding => "embedding",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "keyword" => Ok(Self::Keyword),
            "embedding" => Ok(Self::Embedding),
            _ => Err(Error::InvalidOption {
                option: "method",
                value: s.to_string(),
            }),
        }
    }
}
