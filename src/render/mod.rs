//! Rendering of the analysis output record.

mod json;

pub use json::{to_json, write_json, JsonFormat};
