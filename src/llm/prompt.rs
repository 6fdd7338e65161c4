//! Prompt templates for the language-model judge.

use crate::model::{Query, Section};

/// Prompt asking for a 1-10 relevance rating.
pub fn rating_prompt(section: &Section, query: &Query) -> String {
    format!(
        "You are an expert assistant. Given the following section from a document, a persona, \
         and a job-to-be-done, rate the relevance of the section to the persona's job on a scale \
         of 1 (not relevant) to 10 (highly relevant).\n\n\
         Section: {}\nText: {}\nPersona: {}\nJob: {}\n\n\
         Respond with only the number (1-10).",
        section.title, section.text, query.persona, query.job
    )
}

/// Prompt asking for a short persona-focused summary.
pub fn summary_prompt(section: &Section, query: &Query) -> String {
    format!(
        "You are an expert assistant. Given the following section from a document, a persona, \
         and a job-to-be-done, write a concise summary (2-3 sentences) of the section, focusing \
         on what is most relevant for the persona's job.\n\n\
         Section: {}\nText: {}\nPersona: {}\nJob: {}\n\n\
         Summary:",
        section.title, section.text, query.persona, query.job
    )
}
