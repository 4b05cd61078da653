//! Content-type classification of item link paths.

use std::sync::LazyLock;

use regex::Regex;
use tracing::error;

use playlistextractor_shared::{ItemType, PlaylistExtractorError, Result};

/// Matches the section segment of a platform link path.
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".*/(videos|dashboard|library|learning-paths)/.*").expect("section regex")
});

/// Map a link path to its content type.
///
/// A path outside the known sections is an error: an item without a type
/// cannot be written.
pub fn classify(href: &str) -> Result<ItemType> {
    let section = SECTION_RE
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    match section {
        Some("videos") => Ok(ItemType::Video),
        Some("dashboard") | Some("library") => Ok(ItemType::Book),
        Some("learning-paths") => Ok(ItemType::LearningPath),
        _ => {
            error!(href, "could not get the type");
            Err(PlaylistExtractorError::Classification {
                href: href.to_string(),
            })
        }
    }
}
