//! Recursive discovery of saved playlist pages.
//!
//! Uses the `ignore` crate's walker with every standard filter disabled, so
//! hidden files and gitignored directories are visited like any other.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, instrument};

use playlistextractor_shared::{PlaylistExtractorError, Result};

/// Find every regular file under `root` whose extension equals `extension`
/// (case-insensitive, leading dot optional). Results are sorted by path.
#[instrument(skip_all, fields(root = %root.display(), extension = %extension))]
pub fn discover_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);

    let mut documents = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| PlaylistExtractorError::Discovery {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if has_extension(entry.path(), extension) {
            debug!(path = %entry.path().display(), "document found");
            documents.push(entry.into_path());
        }
    }

    documents.sort();
    Ok(documents)
}

/// Extension check on the raw file name bytes, so `.html` alone counts and
/// names that are not valid UTF-8 are still found.
fn has_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let bytes = name.as_encoded_bytes();
    bytes
        .iter()
        .rposition(|&b| b == b'.')
        .is_some_and(|dot| bytes[dot + 1..].eq_ignore_ascii_case(extension.as_bytes()))
}
