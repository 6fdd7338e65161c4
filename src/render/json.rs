//! JSON rendering for analysis output.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::AnalysisOutput;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an analysis output record to JSON.
pub fn to_json(output: &AnalysisOutput, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(output),
        JsonFormat::Compact => serde_json::to_string(output),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write an analysis output record to a file, creating parent directories.
pub fn write_json<P: AsRef<Path>>(
    output: &AnalysisOutput,
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json(output, format)?)?;
    Ok(())
}
