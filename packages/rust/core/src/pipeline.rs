//! End-to-end extraction run: discover → read → extract → write.
//!
//! Documents are processed one at a time, in sorted path order. The first
//! fault aborts the run, and the output file is only written after every
//! document succeeded, so a failed run never leaves a partial file behind.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use playlistextractor_extract::extract_document;
use playlistextractor_shared::{AppConfig, PlaylistExtractorError, PlaylistRecord, Result};

use crate::discovery::discover_documents;
use crate::output::write_json;

/// Configuration for one extraction run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory searched recursively for documents.
    pub root: PathBuf,
    /// Destination of the JSON array.
    pub output: PathBuf,
    /// Origin prefixed to item link paths.
    pub origin: String,
    /// Document file extension.
    pub extension: String,
    /// JSON indentation (spaces per level, `0` = compact).
    pub indent: usize,
}

impl RunConfig {
    /// Build a run config from the app config, rooted at `root`, writing
    /// the configured file name inside `root` unless `output` is given.
    pub fn from_app(config: &AppConfig, root: PathBuf, output: Option<PathBuf>) -> Self {
        let output = output.unwrap_or_else(|| root.join(&config.output.file_name));
        Self {
            root,
            output,
            origin: config.extract.origin.clone(),
            extension: config.extract.extension.clone(),
            indent: config.output.indent,
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunResult {
    /// Path of the written JSON file.
    pub output: PathBuf,
    /// Number of playlists written.
    pub playlist_count: usize,
    /// Number of items across all playlists.
    pub item_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter {
    /// Called once discovery finished.
    fn discovered(&self, total: usize);
    /// Called before each document is read.
    fn document_started(&self, path: &Path, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn discovered(&self, _total: usize) {}
    fn document_started(&self, _path: &Path, _current: usize, _total: usize) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run discovery, extraction, and output writing.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn run(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunResult> {
    let start = Instant::now();

    let documents = discover_documents(&config.root, &config.extension)?;
    info!(count = documents.len(), "Found {} playlists", documents.len());
    progress.discovered(documents.len());

    let playlists = extract_documents(&documents, &config.origin, progress)?;
    write_json(&config.output, &playlists, config.indent)?;

    let result = RunResult {
        output: config.output.clone(),
        playlist_count: playlists.len(),
        item_count: playlists.iter().map(|p| p.items.len()).sum(),
        elapsed: start.elapsed(),
    };
    info!(
        playlists = result.playlist_count,
        items = result.item_count,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "run complete"
    );
    progress.done(&result);

    Ok(result)
}

/// Extract every document in order into a new collection.
pub fn extract_documents(
    documents: &[PathBuf],
    origin: &str,
    progress: &dyn ProgressReporter,
) -> Result<Vec<PlaylistRecord>> {
    let mut playlists = Vec::with_capacity(documents.len());
    for (idx, path) in documents.iter().enumerate() {
        progress.document_started(path, idx + 1, documents.len());
        playlists.push(extract_file(path, origin)?);
    }
    Ok(playlists)
}

/// Read one document from disk and extract its record.
#[instrument(skip(origin), fields(path = %path.display()))]
pub fn extract_file(path: &Path, origin: &str) -> Result<PlaylistRecord> {
    info!("Reading path {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| PlaylistExtractorError::io(path, e))?;
    let html = String::from_utf8(bytes)
        .map_err(|e| PlaylistExtractorError::parse(path, format!("not valid UTF-8: {e}")))?;

    extract_document(&html, origin)
}
