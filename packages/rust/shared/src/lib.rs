//! Shared types, error model, and configuration for the playlist extractor.
//!
//! This crate is the foundation depended on by all other playlistextractor crates.
//! It provides:
//! - [`PlaylistExtractorError`]: the unified error type
//! - Domain records ([`PlaylistRecord`], [`ItemRecord`], [`ItemType`])
//! - Configuration ([`AppConfig`], [`ExtractConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_ORIGIN, ExtractConfig, OutputConfig, config_dir, config_file_path,
    init_config, init_config_at, load_config, load_config_from,
};
pub use error::{PlaylistExtractorError, Result};
pub use types::{ItemRecord, ItemType, PlaylistRecord};
