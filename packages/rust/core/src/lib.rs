//! Batch driver for the playlist extractor.
//!
//! This crate ties together document discovery, per-document extraction,
//! and JSON output into one run (see [`pipeline::run`]).

pub mod discovery;
pub mod output;
pub mod pipeline;

pub use discovery::discover_documents;
pub use output::{render_json, write_json};
pub use pipeline::{
    ProgressReporter, RunConfig, RunResult, SilentProgress, extract_documents, extract_file, run,
};
