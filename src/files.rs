use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use globwalk::GlobWalkerBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cutter::CutReport;
use crate::document::Document;

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("NoFilesFound")]
    NoFilesFound { pattern: String },
}

/// Enumerate input files using a glob pattern (e.g., "./pages/**/*.txt").
/// Returns a sorted list of paths.
pub fn enumerate_inputs(glob_pattern: &str) -> Result<Vec<PathBuf>, EnumerateError> {
    let root = if Path::new(glob_pattern).is_absolute() { "/" } else { "." };
    let pat = glob_pattern.trim_start_matches("./");
    let not_found = || EnumerateError::NoFilesFound { pattern: glob_pattern.to_string() };
    let mut paths: Vec<PathBuf> = GlobWalkerBuilder::from_patterns(root, &[pat])
        .case_insensitive(false)
        .follow_links(false)
        .build()
        .map_err(|_| not_found())?
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .collect();

    paths.sort();
    paths.retain(|p| p.is_file());

    if paths.is_empty() {
        return Err(not_found());
    }
    Ok(paths)
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("Invalid document at {path}:{line}: {message}")]
    Parse { path: String, line: usize, message: String },
}

/// Load documents from files. `.jsonl` files hold one serialized document per
/// line; anything else is text split into one document per form-feed page.
pub fn load_documents(paths: &[PathBuf]) -> Result<Vec<Document>, LoadError> {
    let mut documents = Vec::new();
    for path in paths {
        let raw = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if path.extension().is_some_and(|ext| ext == "jsonl") {
            documents.extend(parse_jsonl(path, &raw)?);
        } else {
            documents.extend(split_pages(path, &raw));
        }
    }
    Ok(documents)
}

fn parse_jsonl(path: &Path, raw: &str) -> Result<Vec<Document>, LoadError> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Document>(line).map_err(|e| LoadError::Parse {
                path: path.display().to_string(),
                line: idx + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// One document per form-feed separated page; trailing blank pages are dropped.
pub fn split_pages(path: &Path, raw: &str) -> Vec<Document> {
    let mut pages: Vec<&str> = raw.split('\u{000C}').collect();
    while matches!(pages.last(), Some(last) if last.trim().is_empty()) {
        pages.pop();
    }
    let source = path.display().to_string();
    pages
        .into_iter()
        .enumerate()
        .map(|(idx, page)| {
            let mut metadata = serde_json::Map::new();
            metadata.insert("source".into(), serde_json::json!(source));
            metadata.insert("page".into(), serde_json::json!(idx + 1));
            Document::with_metadata(page, metadata)
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("WriteFailed: {0}")]
    WriteFailed(String),
}

fn write_failed(e: impl ToString) -> EmitError {
    EmitError::WriteFailed(e.to_string())
}

/// Render documents in the readable dump format used for debugging runs.
pub fn render_documents_text(documents: &[Document]) -> String {
    let rule = "---------------------------------------------------------";
    let mut out = format!("List of {} documents\n{}\n\n", documents.len(), rule);
    for (i, doc) in documents.iter().enumerate() {
        let _ = write!(out, "Document {}:\n\n", i);
        let _ = writeln!(out, "Attribute: content Value: {}", doc.content);
        let _ = writeln!(out, "Attribute: metadata Value: {}", serde_json::Value::Object(doc.metadata.clone()));
        let _ = write!(out, "{}\n\n", rule);
    }
    out
}

/// Writes documents to a text file in a readable format, creating the parent folder.
pub fn write_documents_to_text_file(documents: &[Document], file_path: &Path) -> Result<(), EmitError> {
    tracing::info!(path = %file_path.display(), "writing documents to text file");
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }
    std::fs::write(file_path, render_documents_text(documents)).map_err(write_failed)
}

/// Writes documents as pretty JSON, creating the parent folder.
pub fn write_documents_to_json(documents: &[Document], file_path: &Path) -> Result<(), EmitError> {
    tracing::info!(path = %file_path.display(), "writing documents to json file");
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }
    let bytes = serde_json::to_vec_pretty(documents).map_err(write_failed)?;
    std::fs::write(file_path, bytes).map_err(write_failed)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitPaths {
    pub documents_path: String,
    pub meta_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputMeta {
    pub document_count: usize,
    pub removed_headers: usize,
    pub removed_footers: usize,
    /// Removed sequences in the order they were applied.
    pub sequences: Vec<String>,
}

impl OutputMeta {
    pub fn new(documents: &[Document], report: &CutReport) -> Self {
        Self {
            document_count: documents.len(),
            removed_headers: report.removed_headers,
            removed_footers: report.removed_footers,
            sequences: report.excisions.iter().map(|e| e.sequence.clone()).collect(),
        }
    }
}

/// Atomically write `<stem>.jsonl` and `<stem>.meta.json` into outdir.
pub fn emit_documents(documents: &[Document], meta: &OutputMeta, outdir: &Path, stem: &str) -> Result<EmitPaths, EmitError> {
    std::fs::create_dir_all(outdir).map_err(write_failed)?;
    let docs_path = outdir.join(format!("{}.jsonl", stem));
    let meta_path = outdir.join(format!("{}.meta.json", stem));

    // Write temp files then rename
    let pid = std::process::id();
    let docs_tmp = docs_path.with_extension(format!("jsonl.tmp.{}", pid));
    let meta_tmp = meta_path.with_extension(format!("json.tmp.{}", pid));

    let mut lines = String::new();
    for doc in documents {
        lines.push_str(&serde_json::to_string(doc).map_err(write_failed)?);
        lines.push('\n');
    }
    std::fs::write(&docs_tmp, lines).map_err(write_failed)?;
    let meta_bytes = serde_json::to_vec_pretty(meta).map_err(write_failed)?;
    std::fs::write(&meta_tmp, meta_bytes).map_err(write_failed)?;

    std::fs::rename(&docs_tmp, &docs_path).map_err(write_failed)?;
    std::fs::rename(&meta_tmp, &meta_path).map_err(write_failed)?;

    Ok(EmitPaths {
        documents_path: docs_path.to_string_lossy().to_string(),
        meta_path: meta_path.to_string_lossy().to_string(),
    })
}
