//! Application configuration for the playlist extractor.
//!
//! User config lives at `~/.playlistextractor/playlistextractor.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PlaylistExtractorError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "playlistextractor.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".playlistextractor";

/// Origin prefixed to every relative item link.
pub const DEFAULT_ORIGIN: &str = "https://learning.oreilly.com";

// ---------------------------------------------------------------------------
// Config structs (matching playlistextractor.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[extract]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Origin prefixed to relative item links to build `itemHref`.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// File extension (without the dot) of saved playlist pages.
    /// Matched case-insensitively.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            extension: default_extension(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.into()
}
fn default_extension() -> String {
    "html".into()
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Name of the JSON file written to the working directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Spaces per indentation level; `0` writes compact JSON.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            indent: default_indent(),
        }
    }
}

fn default_file_name() -> String {
    "all_playlists.json".into()
}
fn default_indent() -> usize {
    1
}

impl AppConfig {
    /// Check values that serde cannot: the origin must be an absolute
    /// http(s) URL without a trailing slash, and the extension non-empty.
    pub fn validate(&self) -> Result<()> {
        let origin = &self.extract.origin;
        let parsed = Url::parse(origin).map_err(|e| {
            PlaylistExtractorError::config(format!("invalid origin {origin:?}: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PlaylistExtractorError::config(format!(
                "origin {origin:?} must use http or https"
            )));
        }
        if origin.ends_with('/') {
            return Err(PlaylistExtractorError::config(format!(
                "origin {origin:?} must not end with '/'"
            )));
        }

        let ext = self.extract.extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(PlaylistExtractorError::config("extension must not be empty"));
        }
        if self.output.file_name.trim().is_empty() {
            return Err(PlaylistExtractorError::config("output file_name must not be empty"));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.playlistextractor/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PlaylistExtractorError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.playlistextractor/playlistextractor.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PlaylistExtractorError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        PlaylistExtractorError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_at(&config_file_path()?)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| PlaylistExtractorError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config)
        .map_err(|e| PlaylistExtractorError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| PlaylistExtractorError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}
