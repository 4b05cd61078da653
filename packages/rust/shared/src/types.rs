//! Core domain records produced by the extractor.
//!
//! Field names on disk follow the `all_playlists.json` layout, which is
//! why the serde renames differ from the Rust field names.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ItemType
// ---------------------------------------------------------------------------

/// Content type of a playlist item, derived from its link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Video,
    Book,
    LearningPath,
}

impl ItemType {
    /// Wire name, as written to the JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Book => "book",
            Self::LearningPath => "learning-path",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ItemRecord
// ---------------------------------------------------------------------------

/// One entry within a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display name (normalized link text).
    #[serde(rename = "itemName")]
    pub name: String,
    /// Byline of the item; empty when the page has none for it.
    #[serde(rename = "itemAuthor", default)]
    pub author: String,
    /// Numeric identifier taken from the link path.
    #[serde(rename = "itemId")]
    pub id: String,
    #[serde(rename = "itemType")]
    pub item_type: ItemType,
    /// Absolute URL (origin + relative link path).
    #[serde(rename = "itemHref")]
    pub href: String,
}

// ---------------------------------------------------------------------------
// PlaylistRecord
// ---------------------------------------------------------------------------

/// Everything extracted from one saved playlist page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    /// Playlist title, stored as it appears on the page.
    pub name: String,
    /// Normalized playlist byline.
    pub author: String,
    pub description: String,
    /// Raw "last updated" text; not parsed as a date.
    #[serde(rename = "lastModified")]
    pub last_modified: String,
    /// Raw item-count text (e.g. `"12 items"`); not parsed as a number.
    #[serde(rename = "numberOfItems")]
    pub item_count: String,
    /// Items in document order.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}
