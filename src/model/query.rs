//! Persona and job-to-be-done query.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The persona + task description sections are ranked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Who the analysis is for
    pub persona: String,
    /// What they are trying to accomplish
    pub job: String,
}

impl Query {
    /// Create a query from flat strings.
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job: job.into(),
        }
    }

    /// Build a query from a descriptor whose fields may be strings or nested
    /// objects.
    ///
    /// Structured fields are flattened by joining their leaf values with single
    /// spaces, in the order the keys appear in the descriptor.
    pub fn from_descriptor(descriptor: &Value) -> Result<Self> {
        let object = descriptor
            .as_object()
            .ok_or_else(|| Error::InvalidInput("query descriptor must be a JSON object".into()))?;

        let persona = object
            .get("persona")
            .ok_or_else(|| Error::InvalidInput("query descriptor is missing \"persona\"".into()))?;
        let job = object.get("job_to_be_done").ok_or_else(|| {
            Error::InvalidInput("query descriptor is missing \"job_to_be_done\"".into())
        })?;

        Ok(Self::new(flatten_field(persona), flatten_field(job)))
    }

    /// Check that at least one of persona or job carries text.
    pub fn validate(&self) -> Result<()> {
        if self.persona.trim().is_empty() && self.job.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(())
    }
}

/// Flatten a descriptor field into a single space-joined string.
pub fn flatten_field(value: &Value) -> String {
    let mut parts = Vec::new();
    collect_leaves(value, &mut parts);
    parts.join(" ")
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push(s.clone()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_leaves(v, out)),
    }
}
