//! Error types for the playlist extractor.
//!
//! Library crates use [`PlaylistExtractorError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics and maps each
//! variant to a process exit status with [`PlaylistExtractorError::exit_code`].

use std::path::PathBuf;

/// Top-level error type for all extraction operations.
///
/// Every variant is fatal for the whole run: nothing is retried and no
/// partial output is written.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistExtractorError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Directory traversal failed while discovering documents.
    #[error("discovery error at {path:?}: {message}")]
    Discovery { path: PathBuf, message: String },

    /// Filesystem I/O error while reading a document.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document could not be turned into a node tree.
    #[error("parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A link path matched none of the known content-type segments.
    #[error("could not get the type of {href}")]
    Classification { href: String },

    /// The page does not have the shape the extraction rules rely on.
    #[error("structural error: {message}")]
    Structural { message: String },

    /// The output file could not be serialized, created, or written.
    #[error("output error at {path:?}: {message}")]
    Output { path: PathBuf, message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlaylistExtractorError>;

impl PlaylistExtractorError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a structural error from any displayable message.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural {
            message: msg.into(),
        }
    }

    /// Create a parse error for the document at `path`.
    pub fn parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create an output error for the destination at `path`.
    pub fn output(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Output {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error. Output faults get their own status.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Output { .. } => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PlaylistExtractorError::config("origin must be absolute");
        assert_eq!(err.to_string(), "config error: origin must be absolute");

        let err = PlaylistExtractorError::Classification {
            href: "/unknown-section/123-x".into(),
        };
        assert!(err.to_string().contains("/unknown-section/123-x"));
    }

    #[test]
    fn output_faults_have_distinct_exit_code() {
        let out = PlaylistExtractorError::output("all_playlists.json", "read-only");
        let parse = PlaylistExtractorError::parse("a.html", "invalid utf-8");
        let structural = PlaylistExtractorError::structural("no item");

        assert_eq!(out.exit_code(), 2);
        assert_eq!(parse.exit_code(), 1);
        assert_eq!(structural.exit_code(), 1);
    }
}
