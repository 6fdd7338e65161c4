//! External language-model judge.
//!
//! The judge is an opaque process (by default `ollama run gemma3:1b`) that
//! reads a prompt on stdin and answers on stdout. Every invocation is bounded
//! by a timeout, and every way it can go wrong is a [`JudgeError`] variant so
//! callers can map each one to their fallback value.

mod options;
mod process;
mod prompt;

pub use options::JudgeOptions;
pub use process::{run_with_timeout, ProcessOutput};
pub use prompt::{rating_prompt, summary_prompt};

use std::io;
use std::process::Command;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

/// Failure modes of one judge invocation.
#[derive(Error, Debug)]
pub enum JudgeError {
    /// The judge executable could not be started.
    #[error("failed to start judge process: {0}")]
    Spawn(#[source] io::Error),

    /// Reading from or writing to the judge failed.
    #[error("judge I/O error: {0}")]
    Io(#[from] io::Error),

    /// The judge did not finish in time and was killed.
    #[error("judge timed out after {0:?}")]
    Timeout(Duration),

    /// The judge exited unsuccessfully.
    #[error("judge exited with status {code:?}: {stderr}")]
    NonZeroExit {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Trimmed stderr
        stderr: String,
    },

    /// The judge answered, but not with anything usable.
    #[error("unparsable judge output: {0:?}")]
    UnparsableOutput(String),
}

/// A language-model capability that completes prompts.
pub trait LanguageModel: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Complete a prompt, giving up after `timeout`.
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, JudgeError>;
}

/// Judge backed by a local command-line model runner.
#[derive(Debug, Clone, Default)]
pub struct CommandJudge {
    options: JudgeOptions,
}

impl CommandJudge {
    /// Create a judge with the given options.
    pub fn new(options: JudgeOptions) -> Self {
        Self { options }
    }

    /// Get the judge options.
    pub fn options(&self) -> &JudgeOptions {
        &self.options
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.options.program);
        command.args(self.options.args());
        command
    }
}

impl LanguageModel for CommandJudge {
    fn name(&self) -> &str {
        &self.options.model
    }

    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, JudgeError> {
        let output = run_with_timeout(self.command(), prompt, timeout)?;

        if !output.status.success() {
            return Err(JudgeError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Extract the first integer in `1..=10` from judge output.
pub fn parse_rating(output: &str) -> Result<u8, JudgeError> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER
        .get_or_init(|| Regex::new(r"\d+").unwrap())
        .find_iter(output)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .find(|n| (1..=10).contains(n))
        .map(|n| n as u8)
        .ok_or_else(|| JudgeError::UnparsableOutput(output.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_plain() {
        assert_eq!(parse_rating("7").unwrap(), 7);
        assert_eq!(parse_rating("10").unwrap(), 10);
    }

    #[test]
    fn test_parse_rating_json() {
        assert_eq!(parse_rating("{\"relevance\": 8}").unwrap(), 8);
    }

    #[test]
    fn test_parse_rating_skips_out_of_range() {
        assert_eq!(parse_rating("0 out of 15, so 4").unwrap(), 4);
        assert_eq!(parse_rating("rating 007").unwrap(), 7);
    }

    #[test]
    fn test_parse_rating_unparsable() {
        let err = parse_rating("very relevant").unwrap_err();
        assert!(matches!(err, JudgeError::UnparsableOutput(_)));
        assert!(parse_rating("").is_err());
        assert!(parse_rating("99999999999999999999").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_judge_nonzero_exit() {
        let judge = CommandJudge::new(JudgeOptions::new().with_program("false"));
        let err = judge.complete("prompt", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, JudgeError::NonZeroExit { code: Some(1), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_judge_trims_stdout() {
        let judge = CommandJudge::new(
            JudgeOptions::new()
                .with_program("echo")
                .with_model("  6")
                .with_extra_args(Vec::<String>::new()),
        );
        // echo prints "run   6"
        let output = judge.complete("ignored", Duration::from_secs(5)).unwrap();
        assert_eq!(output, "run   6");
        assert_eq!(parse_rating(&output).unwrap(), 6);
    }

    #[test]
    fn test_command_judge_missing_program() {
        let judge = CommandJudge::new(JudgeOptions::new().with_program("/nonexistent/ollama"));
        let err = judge.complete("prompt", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, JudgeError::Spawn(_)));
    }
}
