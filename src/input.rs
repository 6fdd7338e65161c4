//! Loading of query descriptors and per-document layout files.
//!
//! An input collection is a directory holding one query descriptor
//! ([`QUERY_FILE`]) and any number of layout files (`*.json`), possibly in
//! subdirectories. A layout file is either
//!
//! ```json
//! { "document": "guide.pdf", "spans": [ { "text": "...", "font_size": 12.0, "page_number": 1 } ] }
//! ```
//!
//! or a bare array of spans. Without a `document` field the id is the file
//! name minus its `.json` suffix.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{DocumentLayout, Query, Span};

/// File name of the query descriptor inside an input directory.
pub const QUERY_FILE: &str = "persona_job.json";

/// Name prefix of analysis output files, which may share the input directory.
pub const OUTPUT_FILE_PREFIX: &str = "analysis_output_";

#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutFile {
    Tagged {
        #[serde(default)]
        document: Option<String>,
        spans: Vec<Span>,
    },
    Bare(Vec<Span>),
}

/// Load and flatten a query descriptor.
pub fn load_query<P: AsRef<Path>>(path: P) -> Result<Query> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let descriptor: Value = serde_json::from_str(&data)?;
    Query::from_descriptor(&descriptor).map_err(|e| match e {
        Error::InvalidInput(msg) => Error::InvalidInput(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Load one document's layout file.
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<DocumentLayout> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let file: LayoutFile = serde_json::from_str(&data).map_err(|e| {
        Error::InvalidInput(format!("{}: not a layout file: {}", path.display(), e))
    })?;

    let (document, spans) = match file {
        LayoutFile::Tagged { document, spans } => (document, spans),
        LayoutFile::Bare(spans) => (None, spans),
    };

    let id = match document {
        Some(id) => id,
        None => document_id_from_path(path)?,
    };

    Ok(DocumentLayout::new(id, spans))
}

fn document_id_from_path(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("{}: unusable file name", path.display())))?;
    Ok(name.strip_suffix(".json").unwrap_or(name).to_string())
}

/// Find layout files under `dir`, recursively, sorted by path.
///
/// The query descriptor and earlier analysis outputs
/// (`analysis_output_*.json`) are skipped.
pub fn discover_layouts<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(dir.as_ref(), &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
            continue;
        }

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let is_layout = name != QUERY_FILE && !name.starts_with(OUTPUT_FILE_PREFIX);

        if is_json && is_layout {
            found.push(path);
        }
    }
    Ok(())
}

/// A query plus the documents to analyze.
#[derive(Debug, Clone)]
pub struct Collection {
    /// The persona/job query
    pub query: Query,
    /// Document layouts, in discovery order
    pub documents: Vec<DocumentLayout>,
}

/// Load an input directory: its query descriptor and every layout file.
pub fn load_collection<P: AsRef<Path>>(dir: P) -> Result<Collection> {
    let dir = dir.as_ref();
    let query = load_query(dir.join(QUERY_FILE))?;

    let documents = discover_layouts(dir)?
        .iter()
        .map(load_layout)
        .collect::<Result<Vec<_>>>()?;
    log::debug!("Loaded {} layouts from {}", documents.len(), dir.display());

    Ok(Collection { query, documents })
}
